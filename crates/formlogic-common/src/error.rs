//! Error types for formlogic
//!
//! Only schema defects and I/O are errors. Failed validation is reported
//! through [`crate::ValidationResult`].

use thiserror::Error;

/// Defect in a form schema, detected at save time or by strict resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two fields share an id
    #[error("duplicate field id: {0}")]
    DuplicateField(String),

    /// Field without an id
    #[error("field at position {0} has an empty id")]
    EmptyFieldId(usize),

    /// Rule observes a field that is not in the form
    #[error("field {field} depends on unknown field {target}")]
    UnknownDependency { field: String, target: String },

    /// Rule observes its own target
    #[error("field {0} depends on itself")]
    SelfDependency(String),

    /// Rules form a loop
    #[error("dependency cycle: {}", .path.join(" -> "))]
    CyclicDependency { path: Vec<String> },

    /// Operator not recognised
    #[error("rule on field {field} uses an unknown condition")]
    UnknownCondition { field: String },

    /// Regular expression does not compile
    #[error("field {field} has an invalid pattern: {reason}")]
    InvalidPattern { field: String, reason: String },

    /// Lower bound above upper bound
    #[error("field {field} has inconsistent bounds: {detail}")]
    InvalidBounds { field: String, detail: String },

    /// Choice field without options
    #[error("field {0} has no options")]
    MissingOptions(String),

    /// Rule value has the wrong shape for its operator
    #[error("rule on field {field} needs a list value")]
    InvalidRuleValue { field: String },
}

/// formlogic error type
#[derive(Error, Debug)]
pub enum FormLogicError {
    /// Schema defect
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Malformed JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for formlogic
pub type Result<T> = std::result::Result<T, FormLogicError>;
