//! Dependency resolver
//!
//! Computes which fields are shown for the current answers. The legacy entry
//! point [`resolve_visibility`] reproduces the stored-form behavior: only an
//! `equals` dependency can hide a field. [`Resolver`] adds the opt-in
//! corrected mode, the standalone rule list and cascading through hidden
//! sources.
//!
//! # Rule semantics per target
//!
//! - Show/enable rules gate: if any exist, the target is visible only when at
//!   least one of them matches.
//! - Hide/disable rules block: any matching one hides the target.
//! - A target with no rules is always visible.

use formlogic_common::{
    AnswerSet, AnswerValue, Condition, ConditionalRule, FieldDefinition, FormSchema, RuleAction,
    SchemaError, Visibility, VisibilityMap,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::evaluator::{evaluate_with, EvaluationPolicy};
use crate::graph::DependencyGraph;

/// Which field dependencies govern visibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Stored-form behavior: per-field dependencies only act for `equals`
    /// and their action is ignored
    #[default]
    Legacy,
    /// Every condition and action of a per-field dependency applies
    AllConditions,
}

/// Resolver configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    pub mode: ResolutionMode,
    /// Treat answers of hidden fields as absent when they drive other fields
    pub cascade_hidden: bool,
    pub policy: EvaluationPolicy,
}

/// Legacy visibility for a list of fields
///
/// Never fails: unknown dependency targets leave the field visible and a
/// single pass over raw answers cannot loop.
pub fn resolve_visibility(fields: &[FieldDefinition], answers: &AnswerSet) -> VisibilityMap {
    let rules = migrate_rules(fields, &[], ResolutionMode::Legacy);
    single_pass(fields, &rules, answers, EvaluationPolicy::FailOpen)
}

/// Visibility resolver with explicit options
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    options: ResolverOptions,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve the schema's per-field dependencies and rule list
    ///
    /// # Errors
    /// Returns `SchemaError::CyclicDependency` when `cascade_hidden` is set
    /// and the rules loop.
    pub fn resolve(
        &self,
        schema: &FormSchema,
        answers: &AnswerSet,
    ) -> Result<VisibilityMap, SchemaError> {
        let rules = migrate_rules(&schema.fields, &schema.rules, self.options.mode);
        debug!(
            fields = schema.fields.len(),
            rules = rules.len(),
            mode = ?self.options.mode,
            cascade = self.options.cascade_hidden,
            "resolving visibility"
        );

        if self.options.cascade_hidden {
            cascade(&schema.fields, &rules, answers, self.options.policy)
        } else {
            Ok(single_pass(&schema.fields, &rules, answers, self.options.policy))
        }
    }
}

/// Copy of `answers` without the answers of hidden fields
///
/// Resolution keeps stale answers; callers that want them gone before
/// storing a response use this.
pub fn purge_hidden(answers: &AnswerSet, visibility: &VisibilityMap) -> AnswerSet {
    let mut purged = answers.clone();
    purged.retain(|id, _| visibility.is_visible(id));
    purged
}

/// Migrate per-field dependencies into the rule model and append the
/// schema's rule list, dropping rules that reference unknown fields
pub fn migrate_rules(
    fields: &[FieldDefinition],
    rules: &[ConditionalRule],
    mode: ResolutionMode,
) -> Vec<ConditionalRule> {
    let known: HashSet<&str> = fields.iter().map(|f| f.id.as_str()).collect();
    let mut migrated = Vec::new();

    for field in fields {
        let Some(dependency) = &field.logic else {
            continue;
        };
        if !known.contains(dependency.depends_on_id.as_str()) {
            debug!(field = %field.id, target = %dependency.depends_on_id, "dependency target missing, rule not applied");
            continue;
        }

        let mut rule = ConditionalRule::from_dependency(&field.id, dependency);
        if mode == ResolutionMode::Legacy {
            if dependency.condition != Condition::Equals {
                trace!(field = %field.id, condition = ?dependency.condition, "legacy mode ignores non-equals dependency");
                continue;
            }
            rule.action = RuleAction::Show;
        }
        migrated.push(rule);
    }

    for rule in rules {
        if known.contains(rule.source_field_id.as_str()) && known.contains(rule.target_field_id.as_str()) {
            migrated.push(rule.clone());
        } else {
            debug!(source = %rule.source_field_id, target = %rule.target_field_id, "rule references unknown field, not applied");
        }
    }

    migrated
}

fn rules_by_target(rules: &[ConditionalRule]) -> HashMap<&str, Vec<&ConditionalRule>> {
    let mut by_target: HashMap<&str, Vec<&ConditionalRule>> = HashMap::new();
    for rule in rules {
        by_target
            .entry(rule.target_field_id.as_str())
            .or_default()
            .push(rule);
    }
    by_target
}

/// Apply the gate/block semantics to one target's rules
fn decide<'a, F>(rules: &[&ConditionalRule], policy: EvaluationPolicy, lookup: F) -> Visibility
where
    F: Fn(&str) -> Option<&'a AnswerValue>,
{
    let matches = |rule: &&ConditionalRule| {
        evaluate_with(policy, rule.operator, &rule.value, lookup(&rule.source_field_id))
    };

    let mut gates = rules.iter().filter(|r| r.action.is_gate()).peekable();
    let gated_open = gates.peek().is_none() || gates.any(matches);
    let blocked = rules.iter().filter(|r| !r.action.is_gate()).any(matches);

    if gated_open && !blocked {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

fn single_pass(
    fields: &[FieldDefinition],
    rules: &[ConditionalRule],
    answers: &AnswerSet,
    policy: EvaluationPolicy,
) -> VisibilityMap {
    let by_target = rules_by_target(rules);
    let mut map = VisibilityMap::all_visible(fields);

    for field in fields {
        if let Some(target_rules) = by_target.get(field.id.as_str()) {
            let visibility = decide(target_rules, policy, |id| answers.get(id));
            trace!(field = %field.id, ?visibility, "resolved");
            map.set(field.id.clone(), visibility);
        }
    }
    map
}

fn cascade(
    fields: &[FieldDefinition],
    rules: &[ConditionalRule],
    answers: &AnswerSet,
    policy: EvaluationPolicy,
) -> Result<VisibilityMap, SchemaError> {
    let order = DependencyGraph::build(fields, rules).topological_order()?;
    let by_target = rules_by_target(rules);
    let mut map = VisibilityMap::all_visible(fields);

    for id in &order {
        let Some(target_rules) = by_target.get(id.as_str()) else {
            continue;
        };
        let visibility = {
            let current = &map;
            decide(target_rules, policy, |source| {
                if current.is_hidden(source) {
                    None
                } else {
                    answers.get(source)
                }
            })
        };
        trace!(field = %id, ?visibility, "resolved (cascade)");
        map.set(id.clone(), visibility);
    }
    Ok(map)
}
