//! Engine facade
//!
//! One [`FormEngine`] is built from an [`EngineConfig`] and shared by
//! reference. It keeps no per-call state apart from statistics and the
//! compiled-pattern cache, both safe to share across threads.

use formlogic_common::{AnswerSet, AtomicCounter, FormSchema, Result, ValidationResult, VisibilityMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::PatternCache;
use crate::evaluator::EvaluationPolicy;
use crate::messages::Locale;
use crate::orchestrator::{validate_form_with, CrossFieldValidator};
use crate::resolver::{ResolutionMode, Resolver, ResolverOptions};
use crate::schema_check::{check_schema, ensure_valid_schema, SchemaReport};
use crate::summary::{validation_summary, FieldSummary};
use crate::validator::ValidatorContext;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub resolution_mode: ResolutionMode,
    /// Hidden sources count as unanswered; cycles become errors
    pub cascade_hidden: bool,
    pub evaluation_policy: EvaluationPolicy,
    pub locale: Locale,
    /// Maximum number of compiled user patterns kept
    pub pattern_cache_capacity: u64,
    /// Reject schemas with problems before evaluating
    pub strict_schema: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolution_mode: ResolutionMode::Legacy,
            cascade_hidden: false,
            evaluation_policy: EvaluationPolicy::FailOpen,
            locale: Locale::En,
            pattern_cache_capacity: 1024,
            strict_schema: false,
        }
    }
}

impl EngineConfig {
    fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            mode: self.resolution_mode,
            cascade_hidden: self.cascade_hidden,
            policy: self.evaluation_policy,
        }
    }
}

/// Visibility and validation for one answer set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub visibility: VisibilityMap,
    pub result: ValidationResult,
}

impl Evaluation {
    pub fn is_valid(&self) -> bool {
        self.result.is_valid
    }
}

/// Resolve-then-validate engine
pub struct FormEngine {
    config: EngineConfig,
    resolver: Resolver,
    patterns: PatternCache,

    // Metrics
    evaluations: AtomicCounter,
    invalid: AtomicCounter,
}

impl FormEngine {
    pub fn new(config: EngineConfig) -> Self {
        info!(
            mode = ?config.resolution_mode,
            cascade = config.cascade_hidden,
            locale = ?config.locale,
            "form engine initialised"
        );
        Self {
            resolver: Resolver::new(config.resolver_options()),
            patterns: PatternCache::new(config.pattern_cache_capacity),
            evaluations: AtomicCounter::new(0),
            invalid: AtomicCounter::new(0),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Visibility of every field for `answers`
    pub fn visibility(&self, schema: &FormSchema, answers: &AnswerSet) -> Result<VisibilityMap> {
        if self.config.strict_schema {
            ensure_valid_schema(schema)?;
        }
        Ok(self.resolver.resolve(schema, answers)?)
    }

    /// Validate the fields marked visible in `visibility`
    pub fn validate(
        &self,
        schema: &FormSchema,
        answers: &AnswerSet,
        visibility: &VisibilityMap,
        validators: &[&dyn CrossFieldValidator],
    ) -> ValidationResult {
        let ctx = ValidatorContext::new(self.config.locale).with_patterns(&self.patterns);
        validate_form_with(&schema.fields, answers, visibility, validators, &ctx)
    }

    /// Resolve visibility, then validate
    pub fn evaluate(&self, schema: &FormSchema, answers: &AnswerSet) -> Result<Evaluation> {
        self.evaluate_with(schema, answers, &[])
    }

    /// [`FormEngine::evaluate`] with cross-field validators
    pub fn evaluate_with(
        &self,
        schema: &FormSchema,
        answers: &AnswerSet,
        validators: &[&dyn CrossFieldValidator],
    ) -> Result<Evaluation> {
        self.evaluations.inc();

        let visibility = self.visibility(schema, answers)?;
        let result = self.validate(schema, answers, &visibility, validators);
        if !result.is_valid {
            self.invalid.inc();
        }
        debug!(form = %schema.id, valid = result.is_valid, errors = result.errors.len(), "evaluated");

        Ok(Evaluation { visibility, result })
    }

    pub fn check_schema(&self, schema: &FormSchema) -> SchemaReport {
        check_schema(schema)
    }

    /// Per-field tallies, visibility not applied
    pub fn summary(&self, schema: &FormSchema, answers: &AnswerSet) -> Vec<FieldSummary> {
        validation_summary(&schema.fields, answers)
    }

    /// Get engine statistics
    pub fn stats(&self) -> EngineStats {
        let hits = self.patterns.hits();
        let misses = self.patterns.misses();
        let lookups = hits + misses;

        EngineStats {
            evaluations: self.evaluations.get(),
            invalid_submissions: self.invalid.get(),
            pattern_cache_hits: hits,
            pattern_cache_misses: misses,
            pattern_cache_hit_rate: if lookups > 0 { hits as f64 / lookups as f64 } else { 0.0 },
        }
    }
}

impl Default for FormEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Engine statistics
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub evaluations: u64,
    pub invalid_submissions: u64,
    pub pattern_cache_hits: u64,
    pub pattern_cache_misses: u64,
    pub pattern_cache_hit_rate: f64,
}
