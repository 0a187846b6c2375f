//! Field dependency graph
//!
//! Edges run from a target field to the fields its rules observe. Only ids
//! present in the schema become nodes; rules pointing elsewhere are left out
//! by the caller.

use formlogic_common::{ConditionalRule, FieldDefinition, SchemaError};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Active,
    Done,
}

/// Target -> sources adjacency in schema order
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    sources: HashMap<String, Vec<String>>,
    self_loops: Vec<String>,
}

impl DependencyGraph {
    /// Build from the fields and the (already migrated) rule list
    pub fn build(fields: &[FieldDefinition], rules: &[ConditionalRule]) -> Self {
        let mut graph = Self {
            nodes: fields.iter().map(|f| f.id.clone()).collect(),
            ..Default::default()
        };

        for rule in rules {
            if rule.is_self_referencing() {
                if !graph.self_loops.contains(&rule.target_field_id) {
                    graph.self_loops.push(rule.target_field_id.clone());
                }
                continue;
            }
            let sources = graph
                .sources
                .entry(rule.target_field_id.clone())
                .or_default();
            if !sources.contains(&rule.source_field_id) {
                sources.push(rule.source_field_id.clone());
            }
        }

        graph
    }

    /// Fields `id` depends on
    pub fn sources_of(&self, id: &str) -> &[String] {
        self.sources.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fields whose rules observe themselves
    pub fn self_loops(&self) -> &[String] {
        &self.self_loops
    }

    /// First cycle found, as `a -> b -> ... -> a`; self loops are not reported
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        self.walk().err()
    }

    /// Every node ordered so that sources come before their targets
    pub fn topological_order(&self) -> Result<Vec<String>, SchemaError> {
        if let Some(id) = self.self_loops.first() {
            return Err(SchemaError::CyclicDependency {
                path: vec![id.clone(), id.clone()],
            });
        }
        self.walk()
            .map_err(|path| SchemaError::CyclicDependency { path })
    }

    /// Depth-first post-order over an explicit stack
    fn walk(&self) -> Result<Vec<String>, Vec<String>> {
        let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(self.nodes.len());
        let mut order = Vec::with_capacity(self.nodes.len());
        // (node, index of its next source to visit)
        let mut stack: Vec<(&str, usize)> = Vec::new();

        for root in &self.nodes {
            if marks.contains_key(root.as_str()) {
                continue;
            }
            marks.insert(root.as_str(), Mark::Active);
            stack.push((root.as_str(), 0));

            while let Some(&(id, next)) = stack.last() {
                let Some(source) = self.sources_of(id).get(next) else {
                    marks.insert(id, Mark::Done);
                    order.push(id.to_string());
                    stack.pop();
                    continue;
                };
                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }

                match marks.get(source.as_str()) {
                    Some(Mark::Done) => {}
                    Some(Mark::Active) => return Err(cycle_path(&stack, source)),
                    None => {
                        marks.insert(source.as_str(), Mark::Active);
                        stack.push((source.as_str(), 0));
                    }
                }
            }
        }
        Ok(order)
    }
}

/// Stack suffix starting at `closing`, closed with `closing` again
fn cycle_path(stack: &[(&str, usize)], closing: &str) -> Vec<String> {
    let start = stack.iter().position(|(id, _)| *id == closing).unwrap_or(0);
    let mut path: Vec<String> = stack[start..].iter().map(|(id, _)| id.to_string()).collect();
    path.push(closing.to_string());
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use formlogic_common::{Condition, FieldType, RuleAction};

    fn fields(ids: &[&str]) -> Vec<FieldDefinition> {
        ids.iter()
            .map(|id| FieldDefinition::new(*id, FieldType::Text, *id))
            .collect()
    }

    fn rule(source: &str, target: &str) -> ConditionalRule {
        ConditionalRule::new(source, Condition::Equals, "x", RuleAction::Show, target)
    }

    #[test]
    fn test_sources_before_targets() {
        let graph = DependencyGraph::build(
            &fields(&["c", "b", "a"]),
            &[rule("b", "c"), rule("a", "b")],
        );
        let order = graph.topological_order().unwrap();
        let pos = |id: &str| order.iter().position(|o| o == id).unwrap();
        assert!(pos("a") < pos("b"));
        assert!(pos("b") < pos("c"));
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn test_cycle_detected() {
        let graph = DependencyGraph::build(
            &fields(&["a", "b", "c"]),
            &[rule("b", "a"), rule("c", "b"), rule("a", "c")],
        );
        let cycle = graph.find_cycle().unwrap();
        assert_eq!(cycle.first(), cycle.last());
        assert_eq!(cycle.len(), 4);
        assert!(matches!(
            graph.topological_order(),
            Err(SchemaError::CyclicDependency { .. })
        ));
    }

    #[test]
    fn test_self_loop() {
        let graph = DependencyGraph::build(&fields(&["a"]), &[rule("a", "a")]);
        assert_eq!(graph.self_loops(), &["a".to_string()]);
        assert!(graph.find_cycle().is_none());
        assert!(graph.topological_order().is_err());
    }

    #[test]
    fn test_long_chain_in_reverse_order() {
        const LEN: usize = 20_000;
        let ids: Vec<String> = (0..LEN).rev().map(|i| format!("f{i}")).collect();
        let fields: Vec<FieldDefinition> = ids
            .iter()
            .map(|id| FieldDefinition::new(id.as_str(), FieldType::Text, id.as_str()))
            .collect();
        let rules: Vec<ConditionalRule> = (1..LEN)
            .map(|i| rule(&format!("f{}", i - 1), &format!("f{i}")))
            .collect();

        let graph = DependencyGraph::build(&fields, &rules);
        assert!(graph.find_cycle().is_none());
        let order = graph.topological_order().unwrap();
        assert_eq!(order.len(), LEN);
        assert_eq!(order.first().map(String::as_str), Some("f0"));
        assert_eq!(order.last().map(String::as_str), Some("f19999"));
    }

    #[test]
    fn test_long_cycle_reported() {
        const LEN: usize = 20_000;
        let ids: Vec<String> = (0..LEN).map(|i| format!("f{i}")).collect();
        let fields: Vec<FieldDefinition> = ids
            .iter()
            .map(|id| FieldDefinition::new(id.as_str(), FieldType::Text, id.as_str()))
            .collect();
        let rules: Vec<ConditionalRule> = (0..LEN)
            .map(|i| rule(&format!("f{}", (i + 1) % LEN), &format!("f{i}")))
            .collect();

        let cycle = DependencyGraph::build(&fields, &rules).find_cycle().unwrap();
        assert_eq!(cycle.len(), LEN + 1);
        assert_eq!(cycle.first(), cycle.last());
    }
}
