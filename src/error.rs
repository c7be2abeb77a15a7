use itertools::Itertools;
use thiserror::Error;

/// A step whose `type` is not a registered node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStep {
    pub step_id: String,
    pub type_name: String,
}

fn describe_invalid(steps: &[InvalidStep]) -> String {
    steps
        .iter()
        .map(|s| format!("'{}' (type '{}')", s.step_id, s.type_name))
        .join(", ")
}

/// Errors raised when a node payload is rejected by the editing engine.
///
/// A rejected operation leaves the graph untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Node label must not be empty")]
    EmptyLabel,

    #[error("Node type '{0}' is not a registered node type")]
    UnknownType(String),

    #[error("Node '{0}' cannot be its own parent")]
    SelfParent(String),

    #[error("Parent node '{parent_id}' of node '{node_id}' does not exist")]
    UnknownParent { node_id: String, parent_id: String },

    #[error("Node '{0}' not found in the graph")]
    NodeNotFound(String),

    #[error("Node id '{0}' is already taken")]
    DuplicateNodeId(String),

    #[error("Message must not be empty")]
    EmptyMessage,
}

/// Errors that can occur while turning extracted steps into a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error(
        "{} step(s) reference unregistered node types: {}",
        .0.len(),
        describe_invalid(.0)
    )]
    TypeValidation(Vec<InvalidStep>),
}

impl ConstructionError {
    /// Ids of the steps that caused the rejection.
    pub fn offending_ids(&self) -> Vec<&str> {
        match self {
            ConstructionError::TypeValidation(steps) => {
                steps.iter().map(|s| s.step_id.as_str()).collect()
            }
        }
    }
}

/// Errors from the step extraction boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Step extraction request failed: {0}")]
    Request(String),

    #[error("Step extraction service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Step extraction response was malformed: {0}")]
    Malformed(String),

    #[error("Step extraction service reported an error: {0}")]
    Service(String),

    #[error("A step extraction is already in flight")]
    Busy,
}

/// Errors for transitions the editing surface does not allow from its current state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Cannot {action} while the editor is {state}")]
    InvalidTransition { action: &'static str, state: String },
}

/// Errors that can occur when loading node types from a source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Node type source '{source_name}' is unreachable: {message}")]
    Unreachable { source_name: String, message: String },

    #[error("Node type source '{source_name}' returned malformed data: {message}")]
    Malformed { source_name: String, message: String },
}

/// Errors from the transient session store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Session value under '{key}' could not be deserialized: {message}")]
    Deserialization { key: String, message: String },

    #[error("Session value for '{key}' could not be serialized: {message}")]
    Serialization { key: String, message: String },
}

/// Errors from reading or writing binary graph snapshots.
#[derive(Error, Debug, Clone)]
pub enum SnapshotError {
    #[error("Snapshot error: {0}")]
    Generic(String),
}

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Umbrella error for callers that drive several phases at once.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
