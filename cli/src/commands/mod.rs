//! CLI Commands

pub mod config;
pub mod lint;
pub mod summary;
pub mod validate;
pub mod visibility;

use anyhow::Context;
use formlogic_common::{AnswerSet, FormLogicError, FormSchema};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read a JSON document, or YAML when the extension says so
pub fn load_document<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    if yaml {
        serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .map_err(FormLogicError::from)
            .with_context(|| format!("parsing {}", path.display()))
    }
}

/// Form document and answers named on the command line
pub fn load_inputs(form: &Path, answers: &Path) -> anyhow::Result<(FormSchema, AnswerSet)> {
    let schema: FormSchema = load_document(form)?;
    let answers: AnswerSet = load_document(answers)?;
    tracing::debug!(form = %schema.id, fields = schema.fields.len(), answers = answers.len(), "inputs loaded");
    Ok((schema, answers))
}
