//! Derived field visibility

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::field::{FieldDefinition, FieldId};

/// Visibility of one field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Shown and validated
    #[default]
    Visible,
    /// Skipped by validation
    Hidden,
}

/// Visibility per field id, recomputed on every answer change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityMap(BTreeMap<FieldId, Visibility>);

impl VisibilityMap {
    /// Every field of the schema visible
    pub fn all_visible(fields: &[FieldDefinition]) -> Self {
        Self(
            fields
                .iter()
                .map(|f| (f.id.clone(), Visibility::Visible))
                .collect(),
        )
    }

    /// Record the visibility of `id`
    pub fn set(&mut self, id: impl Into<FieldId>, visibility: Visibility) {
        self.0.insert(id.into(), visibility);
    }

    /// Visibility of `id`, `None` when unknown
    pub fn get(&self, id: &str) -> Option<Visibility> {
        self.0.get(id).copied()
    }

    /// Unknown ids count as visible
    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).unwrap_or_default() == Visibility::Visible
    }

    /// True only when `id` is known and hidden
    pub fn is_hidden(&self, id: &str) -> bool {
        !self.is_visible(id)
    }

    /// Ids currently hidden, in id order
    pub fn hidden_fields(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, v)| **v == Visibility::Hidden)
            .map(|(id, _)| id.as_str())
    }

    /// Entries in field id order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &Visibility)> {
        self.0.iter()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no field is recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(FieldId, Visibility)> for VisibilityMap {
    fn from_iter<T: IntoIterator<Item = (FieldId, Visibility)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    #[test]
    fn test_unknown_ids_fail_open() {
        let map = VisibilityMap::default();
        assert!(map.is_visible("missing"));
    }

    #[test]
    fn test_hidden_fields() {
        let fields = vec![
            FieldDefinition::new("a", FieldType::Text, "A"),
            FieldDefinition::new("b", FieldType::Text, "B"),
        ];
        let mut map = VisibilityMap::all_visible(&fields);
        map.set("b", Visibility::Hidden);
        assert_eq!(map.hidden_fields().collect::<Vec<_>>(), vec!["b"]);
        assert!(map.is_hidden("b"));
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"a":"visible","b":"hidden"}"#);
    }
}
