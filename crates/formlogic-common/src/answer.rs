//! Answer values collected while a form is filled in

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::field::FieldId;

/// Uploaded file reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnswer {
    /// Original file name
    pub name: String,
    /// Size in bytes
    #[serde(alias = "size")]
    pub size_bytes: u64,
    /// Declared MIME type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// One answer; the shape depends on the field type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Explicitly cleared
    Null,
    /// Checkbox
    Bool(bool),
    /// Numeric answer
    Number(f64),
    /// Text, numeric strings, select choices, ISO dates, signature markers
    Text(String),
    /// Multi-select choices
    List(Vec<String>),
    /// Uploaded file
    File(FileAnswer),
}

impl AnswerValue {
    /// Whether the value counts as "not answered"
    ///
    /// Blank text, empty lists and an unchecked box are empty, as is `Null`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::File(_) => false,
        }
    }

    /// Numeric cast; `None` for anything that is not a finite number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|n| n.is_finite())
    }

    /// Borrow the text, if this is a text answer
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// String form used for comparisons: numbers print without a trailing `.0`,
/// lists are comma joined and files print their name.
impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(",")),
            Self::File(file) => f.write_str(&file.name),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Answers keyed by field id; a missing key means unanswered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<FieldId, AnswerValue>);

impl AnswerSet {
    /// Empty answer set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse answers keyed by field id
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style insert
    pub fn with(mut self, id: impl Into<FieldId>, value: impl Into<AnswerValue>) -> Self {
        self.insert(id, value);
        self
    }

    /// Set the answer for `id`, replacing any previous one
    pub fn insert(&mut self, id: impl Into<FieldId>, value: impl Into<AnswerValue>) {
        self.0.insert(id.into(), value.into());
    }

    /// Drop the answer for `id`
    pub fn remove(&mut self, id: &str) -> Option<AnswerValue> {
        self.0.remove(id)
    }

    /// Answer for `id`
    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    /// Answer for `id` unless it is absent or empty
    pub fn answered(&self, id: &str) -> Option<&AnswerValue> {
        self.get(id).filter(|v| !v.is_empty())
    }

    /// Whether `id` has an answer, even an empty one
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Number of answered fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing has been answered
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Answers in field id order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &AnswerValue)> {
        self.0.iter()
    }

    /// Keep only the answers for which `keep` returns true
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &AnswerValue) -> bool,
    {
        self.0.retain(|id, value| keep(id, value));
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: Into<FieldId>,
    V: Into<AnswerValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
