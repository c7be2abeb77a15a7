use crate::graph::Position;
use serde::{Deserialize, Serialize};

/// Places constructed nodes in a single top-to-bottom column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub origin_x: f64,
    pub origin_y: f64,
    pub spacing: f64,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            origin_y: 100.0,
            spacing: 150.0,
        }
    }
}

impl ColumnLayout {
    pub fn position(&self, index: usize) -> Position {
        Position::new(self.origin_x, self.origin_y + index as f64 * self.spacing)
    }
}
