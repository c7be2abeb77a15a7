use serde::{Deserialize, Serialize};

/// Broad grouping of node types, used to arrange the type picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Trigger,
    #[default]
    Action,
    Logic,
}

/// One registered node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTypeDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: NodeCategory,
}

impl NodeTypeDescriptor {
    pub fn new(id: &str, name: &str, description: &str, category: NodeCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
        }
    }
}
