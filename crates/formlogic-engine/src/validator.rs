//! Field validator
//!
//! Checks one answer against one field definition. A required field that is
//! empty yields exactly one error and nothing else is checked; an optional
//! empty field is always valid. Otherwise every violated constraint is
//! reported.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use formlogic_common::{
    AnswerValue, FieldDefinition, FieldType, FieldValidation, ValidationError, ValidationResult,
};
use tracing::trace;

use crate::cache::PatternCache;
use crate::messages::{Issue, Locale};
use crate::patterns::{matches_format, validate_with_regex};

/// Result of validating a single field
pub type FieldOutcome = ValidationResult;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Message language and optional compiled-pattern cache
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatorContext<'a> {
    pub locale: Locale,
    pub patterns: Option<&'a PatternCache>,
}

impl<'a> ValidatorContext<'a> {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            patterns: None,
        }
    }

    pub fn with_patterns(mut self, patterns: &'a PatternCache) -> Self {
        self.patterns = Some(patterns);
        self
    }

    fn pattern_matches(&self, pattern: &str, value: &str) -> bool {
        match self.patterns {
            Some(cache) => cache.is_match(pattern, value),
            None => validate_with_regex(value, pattern),
        }
    }
}

/// Validate `value` against `field` with English messages
pub fn validate_field(value: Option<&AnswerValue>, field: &FieldDefinition) -> FieldOutcome {
    validate_field_with(value, field, &ValidatorContext::default())
}

/// Validate `value` against `field` using `ctx` for messages and patterns
pub fn validate_field_with(
    value: Option<&AnswerValue>,
    field: &FieldDefinition,
    ctx: &ValidatorContext<'_>,
) -> FieldOutcome {
    let issues = check(value, field, ctx);
    trace!(field = %field.id, issues = issues.len(), "validated");

    let label = field.display_label(ctx.locale.unnamed_field());
    let errors = issues
        .iter()
        .map(|issue| ValidationError::field(&field.id, issue.kind(), ctx.locale.render(label, issue)))
        .collect();
    ValidationResult::from_errors(errors)
}

fn check(value: Option<&AnswerValue>, field: &FieldDefinition, ctx: &ValidatorContext<'_>) -> Vec<Issue> {
    let value = match value.filter(|v| !v.is_empty()) {
        Some(v) => v,
        None if field.required => return vec![Issue::Required],
        None => return Vec::new(),
    };

    let rules = &field.validations;
    let mut issues = Vec::new();

    match field.field_type {
        FieldType::Text | FieldType::Textarea => check_text(&value.to_string(), rules, ctx, &mut issues),
        FieldType::Number => check_number(value, rules, &mut issues),
        FieldType::Date => {
            if !is_valid_date(&value.to_string()) {
                issues.push(Issue::InvalidDate);
            }
        }
        FieldType::Select | FieldType::Checkbox => {
            if let Some(options) = &field.options {
                if !is_member(value, options) {
                    issues.push(Issue::InvalidOption);
                }
            }
        }
        FieldType::FileUpload => {
            if let (Some(max_mb), AnswerValue::File(file)) = (rules.max_file_size_mb, value) {
                if file.size_bytes as f64 / BYTES_PER_MB > max_mb {
                    issues.push(Issue::FileTooLarge { max_mb });
                }
            }
        }
        FieldType::Signature => {}
    }

    issues
}

fn check_text(text: &str, rules: &FieldValidation, ctx: &ValidatorContext<'_>, issues: &mut Vec<Issue>) {
    if let Some(format) = rules.format {
        if !matches_format(text, format) {
            issues.push(Issue::InvalidFormat);
        }
    }
    if let Some(pattern) = &rules.pattern {
        if !ctx.pattern_matches(pattern, text) {
            issues.push(Issue::InvalidFormat);
        }
    }

    let length = text.chars().count();
    if let Some(min) = rules.min_length {
        if length < min {
            issues.push(Issue::TooShort { min });
        }
    }
    if let Some(max) = rules.max_length {
        if length > max {
            issues.push(Issue::TooLong { max });
        }
    }
}

fn check_number(value: &AnswerValue, rules: &FieldValidation, issues: &mut Vec<Issue>) {
    let Some(n) = value.as_number() else {
        issues.push(Issue::NotANumber);
        return;
    };

    if let Some(min) = rules.min {
        if n < min {
            issues.push(Issue::BelowMinimum { min });
        }
    }
    if let Some(max) = rules.max {
        if n > max {
            issues.push(Issue::AboveMaximum { max });
        }
    }
}

fn is_member(value: &AnswerValue, options: &[String]) -> bool {
    match value {
        AnswerValue::List(items) => items.iter().all(|item| options.contains(item)),
        other => {
            let chosen = other.to_string();
            options.iter().any(|o| *o == chosen)
        }
    }
}

/// Calendar date, RFC 3339 timestamp or a local `YYYY-MM-DDTHH:MM[:SS]`
fn is_valid_date(text: &str) -> bool {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(text).is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M").is_ok()
}
