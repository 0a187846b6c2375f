//! Visibility command

use formlogic_engine::{EngineConfig, FormEngine};
use std::path::Path;

use super::load_inputs;
use crate::output::{OutputFormat, VisibilityReport};

pub fn handle(form: &Path, answers: &Path, config: EngineConfig, format: OutputFormat) -> anyhow::Result<bool> {
    let (schema, answers) = load_inputs(form, answers)?;
    let visibility = FormEngine::new(config).visibility(&schema, &answers)?;

    format.print(&VisibilityReport {
        schema: &schema,
        visibility: &visibility,
    })?;
    Ok(true)
}
