use super::model::Graph;
use crate::error::SnapshotError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use std::fs;
use std::io::{Read, Write};

/// Binary export of a graph, for handing a built workflow to another tool.
pub struct GraphSnapshot;

impl GraphSnapshot {
    /// Saves the graph to a file using the bincode format.
    pub fn save(graph: &Graph, path: &str) -> Result<(), SnapshotError> {
        let bytes = Self::to_bytes(graph)?;
        let mut file = fs::File::create(path).map_err(|e| {
            SnapshotError::Generic(format!("Could not create file '{}': {}", path, e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            SnapshotError::Generic(format!("Could not write to file '{}': {}", path, e))
        })?;
        tracing::debug!(path, nodes = graph.nodes.len(), "wrote graph snapshot");
        Ok(())
    }

    /// Loads a graph snapshot from a file.
    pub fn from_file(path: &str) -> Result<Graph, SnapshotError> {
        let mut file = fs::File::open(path).map_err(|e| {
            SnapshotError::Generic(format!("Could not open file '{}': {}", path, e))
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            SnapshotError::Generic(format!("Could not read from file '{}': {}", path, e))
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(graph: &Graph) -> Result<Vec<u8>, SnapshotError> {
        encode_to_vec(graph, standard())
            .map_err(|e| SnapshotError::Generic(format!("Serialization failed: {}", e)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Graph, SnapshotError> {
        decode_from_slice(bytes, standard())
            .map(|(graph, _)| graph)
            .map_err(|e| SnapshotError::Generic(format!("Deserialization failed: {}", e)))
    }
}
