use super::edge::EdgeRecord;
use super::node::{NO_PARENT, NodeRecord};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A workflow graph: ordered nodes and the edges between them.
///
/// Order is preserved so that serialization and rendering stay stable across
/// a session bridge handoff.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// A broken structural rule found by [`Graph::violations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphViolation {
    DuplicateNodeId(String),
    DuplicateEdgeId(String),
    DanglingEdge { edge_id: String, missing_node_id: String },
    MultipleParents { node_id: String, sources: Vec<String> },
    SelfLoop { edge_id: String, node_id: String },
    DanglingParent { node_id: String, parent_id: String },
    SelfParent(String),
    ParentMismatch {
        node_id: String,
        declared: Option<String>,
        derived: Option<String>,
    },
}

impl fmt::Display for GraphViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphViolation::DuplicateNodeId(id) => write!(f, "node id '{}' is used more than once", id),
            GraphViolation::DuplicateEdgeId(id) => write!(f, "edge id '{}' is used more than once", id),
            GraphViolation::DanglingEdge {
                edge_id,
                missing_node_id,
            } => write!(f, "edge '{}' references missing node '{}'", edge_id, missing_node_id),
            GraphViolation::MultipleParents { node_id, sources } => write!(
                f,
                "node '{}' has {} inbound edges (from {})",
                node_id,
                sources.len(),
                sources.join(", ")
            ),
            GraphViolation::SelfLoop { edge_id, node_id } => {
                write!(f, "edge '{}' connects node '{}' to itself", edge_id, node_id)
            }
            GraphViolation::DanglingParent { node_id, parent_id } => write!(
                f,
                "node '{}' declares missing parent '{}'",
                node_id, parent_id
            ),
            GraphViolation::SelfParent(id) => write!(f, "node '{}' declares itself as parent", id),
            GraphViolation::ParentMismatch {
                node_id,
                declared,
                derived,
            } => write!(
                f,
                "node '{}' declares parent '{}' but its inbound edge comes from '{}'",
                node_id,
                declared.as_deref().unwrap_or(NO_PARENT),
                derived.as_deref().unwrap_or(NO_PARENT)
            ),
        }
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn edge(&self, id: &str) -> Option<&EdgeRecord> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// All edges whose target is `node_id`. In a forest there is at most one.
    pub fn edges_into<'a>(&'a self, node_id: &str) -> impl Iterator<Item = &'a EdgeRecord> {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    pub fn edges_from<'a>(&'a self, node_id: &str) -> impl Iterator<Item = &'a EdgeRecord> {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    /// The inbound edge of `node_id`, i.e. the materialized parent pointer.
    pub fn parent_edge(&self, node_id: &str) -> Option<&EdgeRecord> {
        self.edges.iter().find(|e| e.target == node_id)
    }

    /// Nodes directly connected below `node_id`, in edge order.
    pub fn children(&self, node_id: &str) -> Vec<&NodeRecord> {
        self.edges_from(node_id)
            .filter_map(|e| self.node(&e.target))
            .collect()
    }

    /// Nodes without an inbound edge, in node order.
    pub fn roots(&self) -> Vec<&NodeRecord> {
        let targets: AHashSet<&str> = self.edges.iter().map(|e| e.target.as_str()).collect();
        self.nodes
            .iter()
            .filter(|n| !targets.contains(n.id.as_str()))
            .collect()
    }

    pub fn in_degrees(&self) -> AHashMap<&str, usize> {
        let mut degrees: AHashMap<&str, usize> =
            self.nodes.iter().map(|n| (n.id.as_str(), 0)).collect();
        for edge in &self.edges {
            *degrees.entry(edge.target.as_str()).or_default() += 1;
        }
        degrees
    }

    /// True when every node has at most one inbound edge.
    pub fn is_forest(&self) -> bool {
        self.edges.iter().map(|e| e.target.as_str()).all_unique()
    }

    /// Every structural rule the graph currently breaks. Empty for a healthy graph.
    pub fn violations(&self) -> Vec<GraphViolation> {
        let mut violations = Vec::new();

        for id in self.nodes.iter().map(|n| n.id.as_str()).duplicates() {
            violations.push(GraphViolation::DuplicateNodeId(id.to_string()));
        }
        for id in self.edges.iter().map(|e| e.id.as_str()).duplicates() {
            violations.push(GraphViolation::DuplicateEdgeId(id.to_string()));
        }

        let node_ids: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !node_ids.contains(endpoint.as_str()) {
                    violations.push(GraphViolation::DanglingEdge {
                        edge_id: edge.id.clone(),
                        missing_node_id: endpoint.clone(),
                    });
                }
            }
            if edge.source == edge.target {
                violations.push(GraphViolation::SelfLoop {
                    edge_id: edge.id.clone(),
                    node_id: edge.source.clone(),
                });
            }
        }

        let inbound = self
            .edges
            .iter()
            .map(|e| (e.target.as_str(), e.source.clone()))
            .into_group_map();
        for node in &self.nodes {
            if let Some(sources) = inbound.get(node.id.as_str()) {
                if sources.len() > 1 {
                    violations.push(GraphViolation::MultipleParents {
                        node_id: node.id.clone(),
                        sources: sources.clone(),
                    });
                }
            }
        }

        for node in &self.nodes {
            let declared = node.declared_parent();
            if let Some(parent) = declared {
                if parent == node.id {
                    violations.push(GraphViolation::SelfParent(node.id.clone()));
                    continue;
                } else if !node_ids.contains(parent) {
                    violations.push(GraphViolation::DanglingParent {
                        node_id: node.id.clone(),
                        parent_id: parent.to_string(),
                    });
                    continue;
                }
            }
            let derived = self.parent_edge(&node.id).map(|e| e.source.as_str());
            if declared != derived {
                violations.push(GraphViolation::ParentMismatch {
                    node_id: node.id.clone(),
                    declared: declared.map(str::to_string),
                    derived: derived.map(str::to_string),
                });
            }
        }

        violations
    }
}
