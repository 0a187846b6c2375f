//! Lint command

use colored::Colorize;
use formlogic_common::FormSchema;
use formlogic_engine::check_schema;
use std::path::Path;

use super::load_document;
use crate::output::OutputFormat;

/// Report schema problems; `Ok(false)` when any were found
pub fn handle(form: &Path, format: OutputFormat) -> anyhow::Result<bool> {
    let schema: FormSchema = load_document(form)?;
    let report = check_schema(&schema);

    format.print(&report)?;
    if format == OutputFormat::Table && !report.is_ok() {
        println!("{}", format!("{} problem(s) in {}", report.len(), form.display()).yellow());
    }
    Ok(report.is_ok())
}
