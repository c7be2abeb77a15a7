use serde::{Deserialize, Serialize};

/// Parent value meaning "no parent", as submitted by the edit and add forms.
pub const NO_PARENT: &str = "none";

/// Canvas coordinates of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A workflow graph node.
///
/// `parent_id` is the parent pointer declared by the last add or edit. The edge
/// set derived from it is what the rest of the crate treats as authoritative;
/// see [`crate::graph::Graph::parent_edge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub position: Position,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, label: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type: node_type.into(),
            parent_id: None,
            conditions: Vec::new(),
            position: Position::default(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>, conditions: Vec<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self.conditions = conditions;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// The declared parent, with the `"none"` sentinel and blank ids treated as absent.
    pub fn declared_parent(&self) -> Option<&str> {
        effective_parent(self.parent_id.as_deref())
    }
}

/// A node payload that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDraft {
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl NodeDraft {
    pub fn new(label: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            node_type: node_type.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>, conditions: Vec<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self.conditions = conditions;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Normalizes a submitted parent value: `None`, `"none"` and blank strings all mean no parent.
pub fn effective_parent(parent_id: Option<&str>) -> Option<&str> {
    parent_id
        .map(str::trim)
        .filter(|p| !p.is_empty() && *p != NO_PARENT)
}
