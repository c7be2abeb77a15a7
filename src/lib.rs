//! # Stepflow - Workflow Graphs from Extracted Steps
//!
//! **Stepflow** turns a list of workflow steps, as extracted from a free-text request by an
//! external AI service, into a positioned node/edge graph, and then keeps that graph
//! consistent while a user edits it by hand.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Node Types**: Build a [`NodeTypeRegistry`](registry::NodeTypeRegistry),
//!     either from the compiled-in types or from a [`NodeTypeSource`](registry::NodeTypeSource).
//!     Anything implementing [`TypeValidator`](registry::TypeValidator) can stand in for it.
//! 2.  **Extract Steps**: Send the user's message to a [`StepExtractor`](extract::StepExtractor),
//!     or convert your own format with [`IntoSteps`](construction::IntoSteps).
//! 3.  **Construct**: A [`GraphConstructor`](construction::GraphConstructor) validates every
//!     step type and lays the steps out as a graph, one edge per dependency.
//! 4.  **Edit**: Hand the graph to a [`GraphEditor`](editor::GraphEditor). Every add, edit and
//!     delete keeps at most one inbound edge per node.
//!
//! [`ChatSession`](chat::ChatSession) drives steps 2 and 3 for a conversation, and
//! [`SessionBridge`](session::SessionBridge) carries the result over to the editor.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stepflow::prelude::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let registry = NodeTypeRegistry::builtin();
//!
//!     let steps = vec![
//!         Step::new("1", "Scrape Properties", "scraper", &[]),
//!         Step::new("2", "Filter Results", "filter", &["1"]),
//!         Step::new("3", "Send to Google Sheets", "sheets", &["2"]),
//!     ];
//!
//!     let graph = GraphConstructor::default().construct(&steps, &registry)?;
//!     println!("Built {} nodes and {} edges", graph.nodes.len(), graph.edges.len());
//!
//!     let mut editor = GraphEditor::new(graph, registry);
//!     let id = editor.add_node(NodeDraft::new("Notify Team", "email").with_parent("3", vec![]))?;
//!     editor.delete_node("2");
//!
//!     // "3" lost its parent together with "2"; the new node still hangs off "3".
//!     assert!(editor.resolve_parent("3").is_none());
//!     assert_eq!(editor.resolve_parent(&id).map(|n| n.id.as_str()), Some("3"));
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod config;
pub mod construction;
pub mod editor;
pub mod error;
pub mod extract;
pub mod graph;
pub mod prelude;
pub mod registry;
pub mod session;
