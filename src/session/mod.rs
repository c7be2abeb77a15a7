//! Single-read handoff of a graph (and its chat transcript) between views.
//!
//! Values are written as plain JSON under well-known keys and removed by the read
//! that consumes them, so a graph bridged for one session never resurfaces in a
//! later, unrelated one.

pub mod store;

pub use store::*;

use crate::chat::Message;
use crate::error::BridgeError;
use crate::graph::Graph;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key holding the serialized chat transcript.
pub const MESSAGES_KEY: &str = "chatMessages";
/// Key holding the serialized `{nodes, edges}` graph.
pub const GRAPH_KEY: &str = "workflowGraph";

pub struct SessionBridge<S = MemoryStore> {
    store: S,
}

impl SessionBridge<MemoryStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl Default for SessionBridge<MemoryStore> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<S: SessionStore> SessionBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Serializes `graph` under `key`, replacing any previous value.
    pub fn put(&mut self, key: &str, graph: &Graph) -> Result<(), BridgeError> {
        self.put_json(key, graph)
    }

    /// Reads and removes the graph under `key`.
    ///
    /// The entry is consumed even when it fails to deserialize.
    pub fn take(&mut self, key: &str) -> Result<Option<Graph>, BridgeError> {
        self.take_json(key)
    }

    /// Like [`take`](Self::take), falling back to an empty graph when the entry is
    /// missing or corrupt.
    pub fn take_or_empty(&mut self, key: &str) -> Graph {
        match self.take(key) {
            Ok(graph) => graph.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(key, "discarding bridged graph: {}", err);
                Graph::default()
            }
        }
    }

    pub fn put_transcript(&mut self, messages: &[Message]) -> Result<(), BridgeError> {
        self.put_json(MESSAGES_KEY, messages)
    }

    /// Reads and removes the bridged transcript; a corrupt entry yields an empty one.
    pub fn take_transcript(&mut self) -> Vec<Message> {
        match self.take_json(MESSAGES_KEY) {
            Ok(messages) => messages.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(key = MESSAGES_KEY, "discarding bridged transcript: {}", err);
                Vec::new()
            }
        }
    }

    /// Drops every bridged value, as a navigation reset does.
    pub fn reset(&mut self) {
        self.store.clear();
    }

    fn put_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), BridgeError> {
        let json = serde_json::to_string(value).map_err(|e| BridgeError::Serialization {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(key, bytes = json.len(), "bridged value stored");
        self.store.set(key, json);
        Ok(())
    }

    fn take_json<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, BridgeError> {
        let Some(raw) = self.store.remove(key) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| BridgeError::Deserialization {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}
