//! One-shot transform from an extracted step list into a positioned graph.

pub mod conversion;
pub mod layout;
pub mod templates;

pub use conversion::*;
pub use layout::*;
pub use templates::*;

use crate::error::{ConstructionError, InvalidStep};
use crate::extract::Step;
use crate::graph::{EdgeRecord, Graph, NodeRecord};
use crate::registry::TypeValidator;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Condition attached to every edge produced from a step dependency.
pub const DEFAULT_CONDITION: &str = "Success";

/// How steps that list several dependencies are turned into edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyPolicy {
    /// One edge per dependency. The result may give a node several parents.
    #[default]
    Preserve,
    /// Only the first dependency becomes an edge, so the result is a forest.
    FirstParent,
}

pub struct GraphConstructor {
    layout: ColumnLayout,
    policy: DependencyPolicy,
    default_conditions: Vec<String>,
}

pub struct GraphConstructorBuilder {
    layout: ColumnLayout,
    policy: DependencyPolicy,
    default_conditions: Vec<String>,
}

impl GraphConstructorBuilder {
    pub fn new() -> Self {
        Self {
            layout: ColumnLayout::default(),
            policy: DependencyPolicy::default(),
            default_conditions: vec![DEFAULT_CONDITION.to_string()],
        }
    }
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }
    pub fn with_dependency_policy(mut self, policy: DependencyPolicy) -> Self {
        self.policy = policy;
        self
    }
    pub fn with_default_condition(mut self, condition: &str) -> Self {
        self.default_conditions = vec![condition.to_string()];
        self
    }
    pub fn build(self) -> GraphConstructor {
        GraphConstructor {
            layout: self.layout,
            policy: self.policy,
            default_conditions: self.default_conditions,
        }
    }
}

impl Default for GraphConstructorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for GraphConstructor {
    fn default() -> Self {
        GraphConstructorBuilder::new().build()
    }
}

impl GraphConstructor {
    pub fn builder() -> GraphConstructorBuilder {
        GraphConstructorBuilder::new()
    }

    pub fn policy(&self) -> DependencyPolicy {
        self.policy
    }

    /// Builds a graph from `steps`, replacing whatever graph the caller held before.
    ///
    /// Every step type is checked first. If any is rejected, nothing is built and
    /// the error names all offending steps.
    pub fn construct<V>(&self, steps: &[Step], types: &V) -> Result<Graph, ConstructionError>
    where
        V: TypeValidator + ?Sized,
    {
        validate_step_types(steps, types)?;

        let known_ids: AHashSet<&str> = steps.iter().map(|s| s.id.as_str()).collect();
        let mut graph = Graph::new();

        for (index, step) in steps.iter().enumerate() {
            let mut node = NodeRecord::new(&step.id, &step.label, &step.step_type)
                .at(self.layout.position(index));
            if let Some(first) = step.dependencies.first() {
                node = node.with_parent(first, self.default_conditions.clone());
            }
            graph.nodes.push(node);
        }

        for step in steps {
            let mut seen: AHashSet<&str> = AHashSet::new();
            for dependency in &step.dependencies {
                if !seen.insert(dependency.as_str()) {
                    tracing::debug!(step = %step.id, dependency = %dependency, "skipping repeated dependency");
                    continue;
                }
                if !known_ids.contains(dependency.as_str()) {
                    tracing::warn!(
                        step = %step.id,
                        dependency = %dependency,
                        "step depends on an id outside its batch"
                    );
                }
                graph.edges.push(EdgeRecord::between(
                    dependency.as_str(),
                    step.id.as_str(),
                    self.default_conditions.clone(),
                ));
                if self.policy == DependencyPolicy::FirstParent {
                    break;
                }
            }
        }

        tracing::info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            policy = ?self.policy,
            "constructed workflow graph"
        );
        Ok(graph)
    }
}

/// Checks every step type, collecting all rejections rather than stopping at the first.
pub fn validate_step_types<V>(steps: &[Step], types: &V) -> Result<(), ConstructionError>
where
    V: TypeValidator + ?Sized,
{
    let invalid: Vec<InvalidStep> = steps
        .iter()
        .filter(|s| !types.is_valid_type(&s.step_type))
        .map(|s| InvalidStep {
            step_id: s.id.clone(),
            type_name: s.step_type.clone(),
        })
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        tracing::warn!(count = invalid.len(), "rejecting steps with unregistered types");
        Err(ConstructionError::TypeValidation(invalid))
    }
}
