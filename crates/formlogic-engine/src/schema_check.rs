//! Save-time schema checks
//!
//! The resolver tolerates broken schemas (dangling targets stay visible,
//! a single pass cannot loop). These checks are for the editor to reject
//! such schemas before they are published.

use formlogic_common::{AnswerValue, Condition, FieldDefinition, FormSchema, SchemaError};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

use crate::graph::DependencyGraph;
use crate::resolver::{migrate_rules, ResolutionMode};

/// Every problem found in a schema, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    #[serde(serialize_with = "as_messages")]
    pub problems: Vec<SchemaError>,
}

impl SchemaReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// First problem as an error
    pub fn into_result(self) -> Result<(), SchemaError> {
        match self.problems.into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }
}

fn as_messages<S: serde::Serializer>(problems: &[SchemaError], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(problems.iter().map(ToString::to_string))
}

/// Collect every problem in `schema`
pub fn check_schema(schema: &FormSchema) -> SchemaReport {
    let mut problems = Vec::new();
    let mut seen = HashSet::new();
    let known: HashSet<&str> = schema.fields.iter().map(|f| f.id.as_str()).collect();

    for (position, field) in schema.fields.iter().enumerate() {
        if field.id.trim().is_empty() {
            problems.push(SchemaError::EmptyFieldId(position));
        } else if !seen.insert(field.id.as_str()) {
            problems.push(SchemaError::DuplicateField(field.id.clone()));
        }
        check_field(&known, field, &mut problems);
    }

    for rule in &schema.rules {
        for id in [&rule.source_field_id, &rule.target_field_id] {
            if !known.contains(id.as_str()) {
                problems.push(SchemaError::UnknownDependency {
                    field: rule.target_field_id.clone(),
                    target: id.clone(),
                });
            }
        }
        if rule.is_self_referencing() {
            problems.push(SchemaError::SelfDependency(rule.target_field_id.clone()));
        }
        if rule.operator == Condition::Unknown {
            problems.push(SchemaError::UnknownCondition {
                field: rule.target_field_id.clone(),
            });
        }
        if rule.operator == Condition::In && !matches!(rule.value, AnswerValue::List(_)) {
            problems.push(SchemaError::InvalidRuleValue {
                field: rule.target_field_id.clone(),
            });
        }
    }

    // Every declared dependency counts here, whatever the resolution mode.
    let rules = migrate_rules(&schema.fields, &schema.rules, ResolutionMode::AllConditions);
    if let Some(path) = DependencyGraph::build(&schema.fields, &rules).find_cycle() {
        warn!(cycle = %path.join(" -> "), "dependency cycle in schema");
        problems.push(SchemaError::CyclicDependency { path });
    }

    SchemaReport { problems }
}

/// First problem in `schema`, if any
pub fn ensure_valid_schema(schema: &FormSchema) -> Result<(), SchemaError> {
    check_schema(schema).into_result()
}

fn check_field(known: &HashSet<&str>, field: &FieldDefinition, problems: &mut Vec<SchemaError>) {
    if let Some(logic) = &field.logic {
        if logic.depends_on_id == field.id {
            problems.push(SchemaError::SelfDependency(field.id.clone()));
        } else if !known.contains(logic.depends_on_id.as_str()) {
            problems.push(SchemaError::UnknownDependency {
                field: field.id.clone(),
                target: logic.depends_on_id.clone(),
            });
        }
        match logic.condition {
            Condition::Unknown => problems.push(SchemaError::UnknownCondition {
                field: field.id.clone(),
            }),
            Condition::In => problems.push(SchemaError::InvalidRuleValue {
                field: field.id.clone(),
            }),
            _ => {}
        }
    }

    let rules = &field.validations;
    if let Some(pattern) = &rules.pattern {
        if let Err(e) = Regex::new(pattern) {
            problems.push(SchemaError::InvalidPattern {
                field: field.id.clone(),
                reason: e.to_string(),
            });
        }
    }
    if let (Some(min), Some(max)) = (rules.min_length, rules.max_length) {
        if min > max {
            problems.push(SchemaError::InvalidBounds {
                field: field.id.clone(),
                detail: format!("minLength {min} > maxLength {max}"),
            });
        }
    }
    if let (Some(min), Some(max)) = (rules.min, rules.max) {
        if min > max {
            problems.push(SchemaError::InvalidBounds {
                field: field.id.clone(),
                detail: format!("min {min} > max {max}"),
            });
        }
    }

    if field.field_type.has_options() && field.options.as_ref().map_or(true, Vec::is_empty) {
        problems.push(SchemaError::MissingOptions(field.id.clone()));
    }
}
