//! Validate command

use colored::Colorize;
use formlogic_engine::{EngineConfig, FormEngine};
use std::path::Path;

use super::load_inputs;
use crate::output::{EvaluationReport, OutputFormat};

/// Resolve visibility and validate; `Ok(false)` when the answers are invalid
pub fn handle(form: &Path, answers: &Path, config: EngineConfig, format: OutputFormat) -> anyhow::Result<bool> {
    let (schema, answers) = load_inputs(form, answers)?;
    let engine = FormEngine::new(config);
    let evaluation = engine.evaluate(&schema, &answers)?;

    format.print(&EvaluationReport {
        schema: &schema,
        evaluation: &evaluation,
    })?;

    if format == OutputFormat::Table {
        if evaluation.is_valid() {
            println!("{}", "✓ answers can be submitted".green());
        } else {
            println!("{}", "✗ answers cannot be submitted".red());
        }
    }
    Ok(evaluation.is_valid())
}
