//! Field definitions
//!
//! A field is authored in the form editor and persisted inside the form
//! document. Serialized names follow the stored document format (camelCase
//! keys, Portuguese type tags) and accept English aliases.

use serde::{Deserialize, Serialize};

use crate::rule::DependencyRule;

/// Field identifier, unique within a form
pub type FieldId = String;

/// Closed set of field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Single line text
    #[serde(rename = "TEXTO", alias = "TEXT", alias = "EMAIL")]
    Text,
    /// Numeric input, answered as a number or a numeric string
    #[serde(rename = "NUMERO", alias = "NUMBER")]
    Number,
    /// Multi-line text
    #[serde(rename = "AREA_TEXTO", alias = "TEXTAREA")]
    Textarea,
    /// Single choice from `options`
    #[serde(rename = "SELECAO", alias = "SELECT")]
    Select,
    /// Checkbox group, single or multiple choice from `options`
    #[serde(rename = "CAIXA_SELECAO", alias = "CHECKBOX")]
    Checkbox,
    /// Calendar date
    #[serde(rename = "DATA", alias = "DATE")]
    Date,
    /// Drawn signature, answered with an opaque marker
    #[serde(rename = "ASSINATURA", alias = "SIGNATURE")]
    Signature,
    /// File upload
    #[serde(rename = "ARQUIVO", alias = "FILE_UPLOAD")]
    FileUpload,
}

impl FieldType {
    /// Whether the type draws its answers from `options`
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Checkbox)
    }

    /// Whether text constraints (pattern, length, format) apply
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text | Self::Textarea)
    }
}

/// Builtin text formats with a predefined pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextFormat {
    /// E-mail address
    Email,
    /// 10 to 15 digit phone number
    Phone,
    /// http(s) URL
    Url,
    /// US style zip code
    Zipcode,
    /// Brazilian individual taxpayer id (000.000.000-00)
    Cpf,
    /// Brazilian company id (00.000.000/0000-00)
    Cnpj,
    /// Dotted IPv4 address
    IpAddress,
    /// 13 to 19 digit card number
    CreditCard,
}

/// Optional per-field constraints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldValidation {
    /// Regular expression the text must match (unanchored search)
    pub pattern: Option<String>,
    /// Builtin format
    pub format: Option<TextFormat>,
    /// Minimum text length in characters
    pub min_length: Option<usize>,
    /// Maximum text length in characters
    pub max_length: Option<usize>,
    /// Inclusive lower bound for numbers
    pub min: Option<f64>,
    /// Inclusive upper bound for numbers
    pub max: Option<f64>,
    /// Upload limit in megabytes
    #[serde(rename = "maxFileSize", alias = "maxFileSizeMb")]
    pub max_file_size_mb: Option<f64>,
}

impl FieldValidation {
    /// True when no constraint is configured
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Unique id within the form
    pub id: FieldId,
    /// Input type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Question shown to the respondent
    #[serde(default)]
    pub label: String,
    /// Hint shown in an empty input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Must be answered when visible
    #[serde(default)]
    pub required: bool,
    /// Choices for select and checkbox fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Legacy single inbound dependency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<DependencyRule>,
    /// Constraints checked on a non-empty answer
    #[serde(default, skip_serializing_if = "FieldValidation::is_empty")]
    pub validations: FieldValidation,
}

impl FieldDefinition {
    /// Create an optional field with no constraints
    pub fn new(id: impl Into<FieldId>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            placeholder: None,
            required: false,
            options: None,
            logic: None,
            validations: FieldValidation::default(),
        }
    }

    /// Mark as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the option list
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Attach a legacy dependency
    pub fn with_logic(mut self, logic: DependencyRule) -> Self {
        self.logic = Some(logic);
        self
    }

    /// Replace the constraints
    pub fn with_validations(mut self, validations: FieldValidation) -> Self {
        self.validations = validations;
        self
    }

    /// Label used in messages, `fallback` when the label is blank
    pub fn display_label<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.label.trim().is_empty() {
            fallback
        } else {
            &self.label
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Condition;

    #[test]
    fn test_deserialize_document_field() {
        let json = r#"{
            "id": "f2",
            "type": "TEXTO",
            "label": "Motivo",
            "required": true,
            "logic": { "dependsOnId": "f1", "condition": "equals", "value": "Sim", "action": "show" },
            "validations": { "minLength": 3, "maxFileSize": 2 }
        }"#;
        let field: FieldDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type, FieldType::Text);
        assert!(field.required);
        let logic = field.logic.unwrap();
        assert_eq!(logic.depends_on_id, "f1");
        assert_eq!(logic.condition, Condition::Equals);
        assert_eq!(field.validations.min_length, Some(3));
        assert_eq!(field.validations.max_file_size_mb, Some(2.0));
    }

    #[test]
    fn test_english_type_aliases() {
        let field: FieldDefinition =
            serde_json::from_str(r#"{"id": "n", "type": "NUMBER"}"#).unwrap();
        assert_eq!(field.field_type, FieldType::Number);
        assert!(!field.required);
        assert!(field.validations.is_empty());

        let field: FieldDefinition =
            serde_json::from_str(r#"{"id": "c", "type": "CHECKBOX", "options": ["a"]}"#).unwrap();
        assert!(field.field_type.has_options());
    }

    #[test]
    fn test_display_label_fallback() {
        let field = FieldDefinition::new("x", FieldType::Text, "  ");
        assert_eq!(field.display_label("Field"), "Field");
        let field = FieldDefinition::new("x", FieldType::Text, "Name");
        assert_eq!(field.display_label("Field"), "Name");
    }
}
