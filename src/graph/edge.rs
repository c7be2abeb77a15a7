use serde::{Deserialize, Serialize};

/// A directed connection from a parent node to a child node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl EdgeRecord {
    /// Creates an edge whose id is derived from its endpoints.
    pub fn between(
        source: impl Into<String>,
        target: impl Into<String>,
        conditions: Vec<String>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: edge_id(&source, &target),
            source,
            target,
            conditions,
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Deterministic edge id for a `(source, target)` pair.
pub fn edge_id(source: &str, target: &str) -> String {
    format!("{}->{}", source, target)
}
