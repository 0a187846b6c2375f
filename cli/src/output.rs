//! Output formatting

use clap::ValueEnum;
use formlogic_common::{FormSchema, ValidationResult, Visibility, VisibilityMap};
use formlogic_engine::{Evaluation, FieldSummary, SchemaReport};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Rendering for `--format table`
pub trait TableView {
    fn render_table(&self) -> String;
}

impl OutputFormat {
    pub fn render<T: Serialize + TableView>(&self, data: &T) -> anyhow::Result<String> {
        Ok(match self {
            OutputFormat::Json => serde_json::to_string_pretty(data)?,
            OutputFormat::Yaml => serde_yaml::to_string(data)?,
            OutputFormat::Table => data.render_table(),
        })
    }

    pub fn print<T: Serialize + TableView>(&self, data: &T) -> anyhow::Result<()> {
        println!("{}", self.render(data)?);
        Ok(())
    }
}

#[derive(Tabled)]
struct VisibilityRow {
    #[tabled(rename = "Field")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Visible")]
    visible: &'static str,
}

#[derive(Tabled)]
struct ErrorRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Message")]
    message: String,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Valid")]
    valid: usize,
    #[tabled(rename = "Invalid")]
    invalid: usize,
}

#[derive(Tabled)]
struct ProblemRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Problem")]
    problem: String,
}

/// Visibility in schema field order
#[derive(Serialize)]
pub struct VisibilityReport<'a> {
    #[serde(skip)]
    pub schema: &'a FormSchema,
    #[serde(flatten)]
    pub visibility: &'a VisibilityMap,
}

impl TableView for VisibilityReport<'_> {
    fn render_table(&self) -> String {
        let rows = self.schema.fields.iter().map(|f| VisibilityRow {
            id: f.id.clone(),
            label: f.label.clone(),
            visible: match self.visibility.get(&f.id).unwrap_or_default() {
                Visibility::Visible => "yes",
                Visibility::Hidden => "no",
            },
        });
        Table::new(rows).with(Style::rounded()).to_string()
    }
}

/// Visibility plus validation outcome
#[derive(Serialize)]
pub struct EvaluationReport<'a> {
    #[serde(skip)]
    pub schema: &'a FormSchema,
    #[serde(flatten)]
    pub evaluation: &'a Evaluation,
}

impl TableView for EvaluationReport<'_> {
    fn render_table(&self) -> String {
        let visibility = VisibilityReport {
            schema: self.schema,
            visibility: &self.evaluation.visibility,
        };
        format!(
            "{}\n{}",
            visibility.render_table(),
            self.evaluation.result.render_table()
        )
    }
}

impl TableView for ValidationResult {
    fn render_table(&self) -> String {
        if self.is_valid {
            return "valid".to_string();
        }
        let rows = self.errors.iter().map(|e| ErrorRow {
            field: e.field_id.clone().unwrap_or_else(|| "-".into()),
            kind: format!("{:?}", e.kind),
            message: e.message.clone(),
        });
        format!(
            "invalid ({} errors)\n{}",
            self.errors.len(),
            Table::new(rows).with(Style::rounded())
        )
    }
}

impl TableView for Vec<FieldSummary> {
    fn render_table(&self) -> String {
        let rows = self.iter().map(|s| SummaryRow {
            field: s.field.clone(),
            valid: s.valid_count,
            invalid: s.invalid_count,
        });
        Table::new(rows).with(Style::rounded()).to_string()
    }
}

impl TableView for SchemaReport {
    fn render_table(&self) -> String {
        if self.is_ok() {
            return "no problems found".to_string();
        }
        let rows = self.problems.iter().enumerate().map(|(i, p)| ProblemRow {
            index: i + 1,
            problem: p.to_string(),
        });
        Table::new(rows).with(Style::rounded()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formlogic_common::{ErrorKind, FieldDefinition, FieldType, SchemaError, ValidationError};

    fn schema() -> FormSchema {
        FormSchema::from_fields(vec![
            FieldDefinition::new("f1", FieldType::Text, "Name"),
            FieldDefinition::new("f2", FieldType::Text, "Plate"),
        ])
    }

    #[test]
    fn test_visibility_table_and_json() {
        let schema = schema();
        let mut visibility = VisibilityMap::all_visible(&schema.fields);
        visibility.set("f2", Visibility::Hidden);
        let report = VisibilityReport {
            schema: &schema,
            visibility: &visibility,
        };

        let table = OutputFormat::Table.render(&report).unwrap();
        assert!(table.contains("Plate"));
        assert!(table.contains("no"));

        let json: serde_json::Value = serde_json::from_str(&OutputFormat::Json.render(&report).unwrap()).unwrap();
        assert_eq!(json["f1"], "visible");
        assert_eq!(json["f2"], "hidden");
    }

    #[test]
    fn test_validation_table() {
        let result = ValidationResult::from_errors(vec![ValidationError::field(
            "f1",
            ErrorKind::Required,
            "Name is required",
        )]);
        let table = result.render_table();
        assert!(table.starts_with("invalid (1 errors)"));
        assert!(table.contains("Name is required"));
        assert_eq!(ValidationResult::valid().render_table(), "valid");
    }

    #[test]
    fn test_schema_report_yaml() {
        let report = SchemaReport {
            problems: vec![SchemaError::SelfDependency("a".into())],
        };
        let yaml = OutputFormat::Yaml.render(&report).unwrap();
        assert!(yaml.contains("field a depends on itself"));
        assert!(report.render_table().contains("field a depends on itself"));
    }
}
