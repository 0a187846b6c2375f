//! Summary command

use formlogic_engine::{EngineConfig, FormEngine};
use std::path::Path;

use super::load_inputs;
use crate::output::OutputFormat;

pub fn handle(form: &Path, answers: &Path, config: EngineConfig, format: OutputFormat) -> anyhow::Result<bool> {
    let (schema, answers) = load_inputs(form, answers)?;
    let summary = FormEngine::new(config).summary(&schema, &answers);
    format.print(&summary)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::*;

    #[test]
    fn test_summary() {
        let dir = tempfile::tempdir().unwrap();
        let form = write(&dir, "form.json", FORM_JSON);
        let answers = write(&dir, "answers.json", r#"{"f1": "Talvez"}"#);
        assert!(handle(&form, &answers, EngineConfig::default(), OutputFormat::Table).unwrap());
    }
}
