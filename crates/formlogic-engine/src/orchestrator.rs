//! Form validation orchestrator
//!
//! Validates every visible field in schema order, then runs the form's
//! whole-answer-set validators. Output depends only on the inputs, so the
//! error order is stable across runs.

use formlogic_common::{AnswerSet, FieldDefinition, ValidationError, ValidationResult, VisibilityMap};
use tracing::debug;

use crate::validator::{validate_field_with, ValidatorContext};

/// Validator over the full answer set
///
/// Sees raw answers, including those of hidden fields; an implementation
/// that cares about visibility has to check it itself.
pub trait CrossFieldValidator: Send + Sync {
    /// Messages for every violation; empty when satisfied
    fn validate(&self, answers: &AnswerSet) -> Vec<String>;
}

impl<F> CrossFieldValidator for F
where
    F: Fn(&AnswerSet) -> Vec<String> + Send + Sync,
{
    fn validate(&self, answers: &AnswerSet) -> Vec<String> {
        self(answers)
    }
}

/// Validate the visible fields of a form
///
/// Fields marked hidden are neither validated nor reported.
pub fn validate_form(
    fields: &[FieldDefinition],
    answers: &AnswerSet,
    visibility: &VisibilityMap,
    validators: &[&dyn CrossFieldValidator],
) -> ValidationResult {
    validate_form_with(fields, answers, visibility, validators, &ValidatorContext::default())
}

/// [`validate_form`] with an explicit message locale and pattern cache
pub fn validate_form_with(
    fields: &[FieldDefinition],
    answers: &AnswerSet,
    visibility: &VisibilityMap,
    validators: &[&dyn CrossFieldValidator],
    ctx: &ValidatorContext<'_>,
) -> ValidationResult {
    let visible = fields.iter().filter(|f| visibility.is_visible(&f.id));
    let result = collect(visible, answers, validators, ctx);
    debug!(
        fields = fields.len(),
        hidden = visibility.hidden_fields().count(),
        errors = result.errors.len(),
        "form validated"
    );
    result
}

/// Validate every field regardless of visibility
///
/// This is how stored responses were checked before visibility rules
/// existed; import pipelines still rely on it.
pub fn validate_responses(
    fields: &[FieldDefinition],
    answers: &AnswerSet,
    validators: &[&dyn CrossFieldValidator],
) -> ValidationResult {
    collect(fields.iter(), answers, validators, &ValidatorContext::default())
}

fn collect<'f>(
    fields: impl Iterator<Item = &'f FieldDefinition>,
    answers: &AnswerSet,
    validators: &[&dyn CrossFieldValidator],
    ctx: &ValidatorContext<'_>,
) -> ValidationResult {
    let mut errors = Vec::new();

    for field in fields {
        let outcome = validate_field_with(answers.get(&field.id), field, ctx);
        errors.extend(outcome.errors);
    }

    for validator in validators {
        errors.extend(
            validator
                .validate(answers)
                .into_iter()
                .map(ValidationError::cross_field),
        );
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve_visibility;
    use formlogic_common::{DependencyRule, ErrorKind, FieldType, FieldValidation};
    use proptest::prelude::*;

    fn vehicle_form() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("f1", FieldType::Select, "Possui veículo?")
                .with_options(["Sim", "Não"])
                .required(),
            FieldDefinition::new("f2", FieldType::Text, "Placa")
                .required()
                .with_logic(DependencyRule::equals("f1", "Sim")),
        ]
    }

    fn check(fields: &[FieldDefinition], answers: &AnswerSet) -> ValidationResult {
        let visibility = resolve_visibility(fields, answers);
        validate_form(fields, answers, &visibility, &[])
    }

    #[test]
    fn test_hidden_required_field_is_skipped() {
        let fields = vehicle_form();
        let answers = AnswerSet::new().with("f1", "Não");

        let visibility = resolve_visibility(&fields, &answers);
        assert!(visibility.is_hidden("f2"));
        assert!(check(&fields, &answers).is_valid);

        // The visibility-unaware pass still demands the plate.
        let result = validate_responses(&fields, &answers, &[]);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field_id.as_deref(), Some("f2"));
        assert_eq!(result.errors[0].kind, ErrorKind::Required);
    }

    #[test]
    fn test_visible_dependent_field_is_validated() {
        let fields = vehicle_form();

        let answers = AnswerSet::new().with("f1", "Sim").with("f2", "ok");
        assert!(check(&fields, &answers).is_valid);

        let answers = AnswerSet::new().with("f1", "Sim");
        assert_eq!(check(&fields, &answers).messages(), vec!["Placa is required"]);
    }

    #[test]
    fn test_number_out_of_range() {
        let fields = vec![FieldDefinition::new("n", FieldType::Number, "Quantidade").with_validations(
            FieldValidation {
                min: Some(1.0),
                max: Some(5.0),
                ..Default::default()
            },
        )];
        let result = check(&fields, &AnswerSet::new().with("n", "7"));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ErrorKind::AboveMaximum);
    }

    #[test]
    fn test_select_outside_options() {
        let fields = vec![FieldDefinition::new("s", FieldType::Select, "Plano").with_options(["A", "B"])];
        let result = check(&fields, &AnswerSet::new().with("s", "C"));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind, ErrorKind::InvalidOption);
    }

    #[test]
    fn test_errors_follow_schema_then_validators() {
        let fields = vec![
            FieldDefinition::new("b", FieldType::Text, "B").required(),
            FieldDefinition::new("a", FieldType::Text, "A").required(),
        ];
        let always = |_: &AnswerSet| vec!["form rejected".to_string()];
        let result = validate_form(&fields, &AnswerSet::new(), &VisibilityMap::all_visible(&fields), &[&always]);

        assert_eq!(result.messages(), vec!["B is required", "A is required", "form rejected"]);
        assert_eq!(result.errors[2].kind, ErrorKind::CrossField);
        assert!(result.errors[2].field_id.is_none());
    }

    #[test]
    fn test_cross_field_validators_see_hidden_answers() {
        let fields = vehicle_form();
        let answers = AnswerSet::new().with("f1", "Não").with("f2", "stale");
        let visibility = resolve_visibility(&fields, &answers);

        let saw_plate = |answers: &AnswerSet| {
            if answers.contains("f2") {
                vec!["plate present".to_string()]
            } else {
                vec![]
            }
        };
        let result = validate_form(&fields, &answers, &visibility, &[&saw_plate]);
        assert_eq!(result.messages(), vec!["plate present"]);
    }

    #[test]
    fn test_empty_schema_is_valid() {
        let result = validate_form(&[], &AnswerSet::new(), &VisibilityMap::default(), &[]);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    fn answer_strategy() -> impl Strategy<Value = Option<String>> {
        proptest::option::of(prop_oneof![Just(String::new()), "[a-z0-9 ]{0,8}", Just("Sim".to_string())])
    }

    proptest! {
        #[test]
        fn prop_hidden_fields_never_reported(f1 in answer_strategy(), f2 in answer_strategy()) {
            let fields = vehicle_form();
            let mut answers = AnswerSet::new();
            if let Some(v) = f1 { answers.insert("f1", v); }
            if let Some(v) = f2 { answers.insert("f2", v); }

            let visibility = resolve_visibility(&fields, &answers);
            let result = validate_form(&fields, &answers, &visibility, &[]);
            for id in visibility.hidden_fields() {
                prop_assert_eq!(result.errors_for(id).count(), 0);
            }
        }

        #[test]
        fn prop_validation_is_deterministic(f1 in answer_strategy(), f2 in answer_strategy()) {
            let fields = vehicle_form();
            let mut answers = AnswerSet::new();
            if let Some(v) = f1 { answers.insert("f1", v); }
            if let Some(v) = f2 { answers.insert("f2", v); }

            prop_assert_eq!(check(&fields, &answers), check(&fields, &answers));
        }

        #[test]
        fn prop_optional_empty_fields_are_valid(blank in "[ \t]{0,4}") {
            let fields = vec![
                FieldDefinition::new("n", FieldType::Number, "N"),
                FieldDefinition::new("d", FieldType::Date, "D"),
                FieldDefinition::new("s", FieldType::Select, "S").with_options(["x"]),
            ];
            let answers: AnswerSet = fields.iter().map(|f| (f.id.clone(), blank.clone())).collect();
            prop_assert!(check(&fields, &answers).is_valid);
        }
    }
}
