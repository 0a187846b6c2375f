//! Form document

use serde::{Deserialize, Serialize};

use crate::field::FieldDefinition;
use crate::rule::ConditionalRule;

/// Persisted form: ordered fields plus the optional rule list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    /// Form id
    #[serde(default)]
    pub id: String,
    /// Form title
    #[serde(default)]
    pub title: String,
    /// Text shown under the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in display order
    #[serde(rename = "elements", alias = "fields", default)]
    pub fields: Vec<FieldDefinition>,
    /// Standalone rules, applied after the per-field dependencies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ConditionalRule>,
}

impl FormSchema {
    /// New empty form with a generated id
    pub fn create(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Form over the given fields, no rule list
    pub fn from_fields(fields: Vec<FieldDefinition>) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    /// Append a field
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a rule
    pub fn with_rule(mut self, rule: ConditionalRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Parse a stored form document
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Field with the given id
    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Whether a field with `id` exists
    pub fn contains_field(&self, id: &str) -> bool {
        self.field(id).is_some()
    }
}
