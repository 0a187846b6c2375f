//! Builtin cross-field validators

use formlogic_common::{AnswerSet, FieldId};
use serde::{Deserialize, Serialize};

use crate::orchestrator::CrossFieldValidator;

/// Two answers must be identical (e-mail or password confirmation)
///
/// Nothing is reported while either side is unanswered; required-ness is
/// the field validator's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsMatch {
    pub field: FieldId,
    pub confirmation: FieldId,
    pub message: String,
}

impl FieldsMatch {
    pub fn new(field: impl Into<FieldId>, confirmation: impl Into<FieldId>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            confirmation: confirmation.into(),
            message: message.into(),
        }
    }
}

impl CrossFieldValidator for FieldsMatch {
    fn validate(&self, answers: &AnswerSet) -> Vec<String> {
        match (answers.answered(&self.field), answers.answered(&self.confirmation)) {
            (Some(a), Some(b)) if a.to_string() != b.to_string() => vec![self.message.clone()],
            _ => Vec::new(),
        }
    }
}

/// At least one of the listed fields must be answered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtLeastOneOf {
    pub fields: Vec<FieldId>,
    pub message: String,
}

impl AtLeastOneOf {
    pub fn new<I, S>(fields: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldId>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }
}

impl CrossFieldValidator for AtLeastOneOf {
    fn validate(&self, answers: &AnswerSet) -> Vec<String> {
        if self.fields.iter().any(|id| answers.answered(id).is_some()) {
            Vec::new()
        } else {
            vec![self.message.clone()]
        }
    }
}
