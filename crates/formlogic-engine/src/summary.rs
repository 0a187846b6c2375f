//! Per-field summaries and dependency queries

use formlogic_common::{AnswerSet, ConditionalRule, FieldDefinition, FieldId};
use serde::{Deserialize, Serialize};

use crate::validator::validate_field;

/// Validation tally for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSummary {
    /// Label, or the id when the label is blank
    pub field: String,
    pub valid_count: usize,
    pub invalid_count: usize,
}

/// One entry per field in schema order, visibility not applied
pub fn validation_summary(fields: &[FieldDefinition], answers: &AnswerSet) -> Vec<FieldSummary> {
    fields
        .iter()
        .map(|field| {
            let valid = validate_field(answers.get(&field.id), field).is_valid;
            FieldSummary {
                field: field.display_label(&field.id).to_string(),
                valid_count: usize::from(valid),
                invalid_count: usize::from(!valid),
            }
        })
        .collect()
}

/// Fields whose answers `field_id`'s visibility depends on
pub fn field_dependencies(field_id: &str, rules: &[ConditionalRule]) -> Vec<FieldId> {
    let mut ids = Vec::new();
    for rule in rules.iter().filter(|r| r.target_field_id == field_id) {
        if !ids.contains(&rule.source_field_id) {
            ids.push(rule.source_field_id.clone());
        }
    }
    ids
}

/// Fields whose visibility depends on `field_id`
pub fn dependent_fields(field_id: &str, rules: &[ConditionalRule]) -> Vec<FieldId> {
    let mut ids = Vec::new();
    for rule in rules.iter().filter(|r| r.source_field_id == field_id) {
        if !ids.contains(&rule.target_field_id) {
            ids.push(rule.target_field_id.clone());
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use formlogic_common::{Condition, FieldType, RuleAction};

    #[test]
    fn test_validation_summary() {
        let fields = vec![
            FieldDefinition::new("name", FieldType::Text, "Nome").required(),
            FieldDefinition::new("age", FieldType::Number, ""),
        ];
        let answers = AnswerSet::new().with("age", "12");

        let summary = validation_summary(&fields, &answers);
        assert_eq!(
            summary,
            vec![
                FieldSummary {
                    field: "Nome".into(),
                    valid_count: 0,
                    invalid_count: 1
                },
                FieldSummary {
                    field: "age".into(),
                    valid_count: 1,
                    invalid_count: 0
                },
            ]
        );
    }

    #[test]
    fn test_dependency_queries() {
        let rules = vec![
            ConditionalRule::new("a", Condition::Equals, "x", RuleAction::Show, "c"),
            ConditionalRule::new("b", Condition::Equals, "y", RuleAction::Hide, "c"),
            ConditionalRule::new("a", Condition::NotEquals, "z", RuleAction::Show, "c"),
            ConditionalRule::new("a", Condition::Equals, "x", RuleAction::Show, "d"),
        ];

        assert_eq!(field_dependencies("c", &rules), vec!["a", "b"]);
        assert_eq!(dependent_fields("a", &rules), vec!["c", "d"]);
        assert!(field_dependencies("a", &rules).is_empty());
        assert!(dependent_fields("c", &rules).is_empty());
    }
}
