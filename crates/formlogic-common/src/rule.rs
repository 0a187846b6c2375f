//! Conditional rules
//!
//! Two shapes are persisted by the editor: the legacy [`DependencyRule`]
//! attached to a single field, and the standalone [`ConditionalRule`] list
//! with a wider operator vocabulary. The engine works on `ConditionalRule`
//! only; legacy rules are migrated with [`ConditionalRule::from_dependency`].

use serde::{Deserialize, Serialize};

use crate::answer::AnswerValue;
use crate::field::FieldId;

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// String equality, numeric when one side is a number
    #[serde(rename = "equals")]
    Equals,
    /// Negation of `Equals`
    #[serde(rename = "not_equals", alias = "notEquals", alias = "not-equals")]
    NotEquals,
    /// Substring of the answer in string form
    #[serde(rename = "contains")]
    Contains,
    /// Numeric `>`
    #[serde(rename = "greaterThan", alias = "greater_than", alias = "greater-than")]
    GreaterThan,
    /// Numeric `<`
    #[serde(rename = "lessThan", alias = "less_than", alias = "less-than")]
    LessThan,
    /// Membership in a list value
    #[serde(rename = "in")]
    In,
    /// Any operator this version does not recognise
    #[serde(other)]
    Unknown,
}

/// What a matching rule does to its target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    /// Visible when the condition holds
    #[default]
    Show,
    /// Hidden when the condition holds
    Hide,
    /// Same as `Show`
    Enable,
    /// Same as `Hide`
    Disable,
}

impl RuleAction {
    /// Show/enable rules gate the target: it is shown only when one matches
    pub fn is_gate(&self) -> bool {
        matches!(self, Self::Show | Self::Enable)
    }
}

/// Legacy single dependency stored on a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRule {
    /// Field whose answer is observed
    #[serde(alias = "dependsOnFieldId", alias = "depends_on_id")]
    pub depends_on_id: FieldId,
    /// Comparison applied to the observed answer
    pub condition: Condition,
    /// Comparison value
    #[serde(default)]
    pub value: String,
    /// Effect on the field when the condition holds
    #[serde(default)]
    pub action: RuleAction,
}

impl DependencyRule {
    /// `depends_on_id` must equal `value`
    pub fn equals(depends_on_id: impl Into<FieldId>, value: impl Into<String>) -> Self {
        Self::new(depends_on_id, Condition::Equals, value)
    }

    /// Dependency with an explicit condition
    pub fn new(
        depends_on_id: impl Into<FieldId>,
        condition: Condition,
        value: impl Into<String>,
    ) -> Self {
        Self {
            depends_on_id: depends_on_id.into(),
            condition,
            value: value.into(),
            action: RuleAction::Show,
        }
    }
}

/// Rule governing one target field from one source field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    /// Field whose answer is observed
    #[serde(rename = "fieldId")]
    pub source_field_id: FieldId,
    /// Comparison applied to the observed answer
    pub operator: Condition,
    /// Comparison value; a list for [`Condition::In`]
    pub value: AnswerValue,
    /// Effect on the target when the condition holds
    #[serde(default)]
    pub action: RuleAction,
    /// Field whose visibility the rule governs
    pub target_field_id: FieldId,
}

impl ConditionalRule {
    /// Rule from its parts
    pub fn new(
        source_field_id: impl Into<FieldId>,
        operator: Condition,
        value: impl Into<AnswerValue>,
        action: RuleAction,
        target_field_id: impl Into<FieldId>,
    ) -> Self {
        Self {
            source_field_id: source_field_id.into(),
            operator,
            value: value.into(),
            action,
            target_field_id: target_field_id.into(),
        }
    }

    /// Migrate the legacy dependency stored on `target`
    pub fn from_dependency(target: &str, dependency: &DependencyRule) -> Self {
        Self {
            source_field_id: dependency.depends_on_id.clone(),
            operator: dependency.condition,
            value: AnswerValue::Text(dependency.value.clone()),
            action: dependency.action,
            target_field_id: target.to_string(),
        }
    }

    /// True when the rule observes its own target
    pub fn is_self_referencing(&self) -> bool {
        self.source_field_id == self.target_field_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_names() {
        let parse = |s: &str| serde_json::from_str::<Condition>(&format!("\"{}\"", s)).unwrap();
        assert_eq!(parse("equals"), Condition::Equals);
        assert_eq!(parse("not_equals"), Condition::NotEquals);
        assert_eq!(parse("notEquals"), Condition::NotEquals);
        assert_eq!(parse("greaterThan"), Condition::GreaterThan);
        assert_eq!(parse("less-than"), Condition::LessThan);
        assert_eq!(parse("in"), Condition::In);
        assert_eq!(parse("startsWith"), Condition::Unknown);
    }

    #[test]
    fn test_rule_list_document() {
        let rule: ConditionalRule = serde_json::from_str(
            r#"{"fieldId": "country", "operator": "in", "value": ["BR", "PT"],
                "action": "hide", "targetFieldId": "zip"}"#,
        )
        .unwrap();
        assert_eq!(rule.operator, Condition::In);
        assert_eq!(rule.action, RuleAction::Hide);
        assert!(matches!(rule.value, AnswerValue::List(ref l) if l.len() == 2));
    }

    #[test]
    fn test_migrate_dependency() {
        let dep = DependencyRule::equals("f1", "Sim");
        let rule = ConditionalRule::from_dependency("f2", &dep);
        assert_eq!(rule.source_field_id, "f1");
        assert_eq!(rule.target_field_id, "f2");
        assert_eq!(rule.value, AnswerValue::from("Sim"));
        assert_eq!(rule.action, RuleAction::Show);
        assert!(!rule.is_self_referencing());
    }
}
