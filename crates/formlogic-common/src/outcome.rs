//! Validation results
//!
//! Validation failure is an ordinary return value. Nothing in here is an
//! `Err`; see [`crate::error`] for the fatal cases.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::FieldId;

/// Category of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required field left empty
    Required,
    /// Text does not match the pattern or format
    InvalidFormat,
    /// Shorter than `minLength`
    TooShort,
    /// Longer than `maxLength`
    TooLong,
    /// Number field with a non-numeric answer
    NotANumber,
    /// Below `min`
    BelowMinimum,
    /// Above `max`
    AboveMaximum,
    /// Not a recognised date
    InvalidDate,
    /// Choice not among the field options
    InvalidOption,
    /// Upload over `maxFileSizeMB`
    FileTooLarge,
    /// Reported by a whole-answer-set validator
    CrossField,
}

/// One human-readable failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field the error belongs to; `None` for cross-field errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<FieldId>,
    /// Category of the failure
    pub kind: ErrorKind,
    /// Message shown to the respondent
    pub message: String,
}

impl ValidationError {
    /// Error attached to one field
    pub fn field(id: impl Into<FieldId>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field_id: Some(id.into()),
            kind,
            message: message.into(),
        }
    }

    /// Error spanning several fields
    pub fn cross_field(message: impl Into<String>) -> Self {
        Self {
            field_id: None,
            kind: ErrorKind::CrossField,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of validating one field or a whole form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when `errors` is empty
    pub is_valid: bool,
    /// Failures in discovery order
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Passing result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// `is_valid` is derived from the error list
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Ordered messages, as shown next to the fields
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Errors reported for one field
    pub fn errors_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors
            .iter()
            .filter(move |e| e.field_id.as_deref() == Some(id))
    }
}
