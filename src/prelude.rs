//! Prelude module for convenient imports
//!
//! This module re-exports the types and traits most callers need to build and edit
//! a workflow graph.
//!
//! # Example
//!
//! ```rust,no_run
//! use stepflow::prelude::*;
//!
//! # fn run_example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let config = StepflowConfig::load("stepflow.toml")?;
//! let steps_json = std::fs::read_to_string("path/to/steps.json")?;
//! let steps: Vec<Step> = serde_json::from_str(&steps_json)?;
//!
//! let graph = config.constructor().construct(&steps, &NodeTypeRegistry::builtin())?;
//! for violation in graph.violations() {
//!     println!("{}", violation);
//! }
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{EdgeRecord, Graph, GraphSnapshot, GraphViolation, NodeDraft, NodeRecord, Position};

// Node types
pub use crate::registry::{NodeTypeDescriptor, NodeTypeRegistry, NodeTypeSource, TypeValidator};

// Extraction and construction
pub use crate::construction::{DependencyPolicy, GraphConstructor, IntoSteps};
pub use crate::extract::{Step, StepExtractor};

// Editing and session handoff
pub use crate::chat::ChatSession;
pub use crate::editor::{EditForm, GraphEditor, SurfaceState};
pub use crate::session::SessionBridge;

// Configuration
pub use crate::config::StepflowConfig;

// Error types
pub use crate::error::{ConstructionError, ExtractionError, ValidationError, WorkflowError};
