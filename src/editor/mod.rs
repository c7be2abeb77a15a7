//! Interactive editing of a live workflow graph.
//!
//! [`GraphEditor`] owns the graph together with the state of the editing surface.
//! The graph-changing work itself lives in [`ops`] as pure functions; the editor
//! applies them, swaps in the result in one step, and moves the surface along.

pub mod ids;
pub mod ops;
pub mod surface;

pub use ids::*;
pub use ops::{add_node, clean_conditions, delete_node, edit_node, resolve_parent};
pub use surface::*;

use crate::error::{SurfaceError, ValidationError, WorkflowError};
use crate::graph::{Graph, NodeDraft, NodeRecord, Position};
use crate::registry::TypeValidator;

/// Edit form contents for one node, hydrated from the current graph.
///
/// `parent_id` and `conditions` come from the node's inbound edge, not from the
/// stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub node_id: String,
    pub label: String,
    pub node_type: String,
    pub parent_id: Option<String>,
    pub conditions: Vec<String>,
    pub position: Position,
}

impl EditForm {
    pub fn from_graph(graph: &Graph, node_id: &str) -> Option<Self> {
        let node = graph.node(node_id)?;
        let parent_edge = graph.parent_edge(node_id);
        Some(Self {
            node_id: node.id.clone(),
            label: node.label.clone(),
            node_type: node.node_type.clone(),
            parent_id: resolve_parent(graph, node_id).map(|p| p.id.clone()),
            conditions: parent_edge.map(|e| e.conditions.clone()).unwrap_or_default(),
            position: node.position,
        })
    }

    pub fn into_record(self) -> NodeRecord {
        NodeRecord {
            id: self.node_id,
            label: self.label,
            node_type: self.node_type,
            parent_id: self.parent_id,
            conditions: self.conditions,
            position: self.position,
        }
    }
}

pub struct GraphEditor<V, G = TimestampIds> {
    graph: Graph,
    surface: SurfaceState,
    types: V,
    ids: G,
}

impl<V: TypeValidator> GraphEditor<V, TimestampIds> {
    pub fn new(graph: Graph, types: V) -> Self {
        Self::with_id_generator(graph, types, TimestampIds::new())
    }
}

impl<V: TypeValidator, G: IdGenerator> GraphEditor<V, G> {
    pub fn with_id_generator(graph: Graph, types: V, ids: G) -> Self {
        Self {
            graph,
            surface: SurfaceState::Idle,
            types,
            ids,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Replaces the whole graph, e.g. after a fresh construction. Closes any open surface.
    pub fn replace_graph(&mut self, graph: Graph) {
        self.graph = graph;
        self.surface.close();
    }

    pub fn surface(&self) -> &SurfaceState {
        &self.surface
    }

    pub fn types(&self) -> &V {
        &self.types
    }

    pub fn open_add(&mut self) -> Result<(), SurfaceError> {
        self.surface.open_add()
    }

    /// Adds a node and closes the add surface. Returns the assigned id.
    pub fn add_node(&mut self, draft: NodeDraft) -> Result<String, ValidationError> {
        let id = self.ids.next_id();
        self.graph = ops::add_node(&self.graph, draft, id.clone(), &self.types)?;
        if self.surface == SurfaceState::Adding {
            self.surface.close();
        }
        tracing::info!(node = %id, nodes = self.graph.nodes.len(), "node added");
        Ok(id)
    }

    /// Selects a node for editing and returns its hydrated form.
    pub fn select_node(&mut self, node_id: &str) -> Result<EditForm, WorkflowError> {
        let form = EditForm::from_graph(&self.graph, node_id)
            .ok_or_else(|| ValidationError::NodeNotFound(node_id.to_string()))?;
        self.surface.select(node_id)?;
        Ok(form)
    }

    /// Every node that may be offered as `node_id`'s parent.
    pub fn parent_candidates(&self, node_id: &str) -> Vec<&NodeRecord> {
        self.graph.nodes.iter().filter(|n| n.id != node_id).collect()
    }

    /// Applies an edit, closes the edit surface and clears the selection.
    pub fn edit_node(&mut self, updated: NodeRecord) -> Result<(), ValidationError> {
        let id = updated.id.clone();
        self.graph = ops::edit_node(&self.graph, updated, &self.types)?;
        self.surface.close();
        tracing::info!(node = %id, "node edited");
        Ok(())
    }

    /// Connects `source` to `target` by rewriting `target`'s parent pointer, which
    /// replaces any edge that already entered `target`.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        conditions: Vec<String>,
    ) -> Result<(), ValidationError> {
        let mut updated = self
            .graph
            .node(target)
            .cloned()
            .ok_or_else(|| ValidationError::NodeNotFound(target.to_string()))?;
        updated.parent_id = Some(source.to_string());
        updated.conditions = conditions;
        self.graph = ops::edit_node(&self.graph, updated, &self.types)?;
        tracing::info!(source, target, "nodes connected");
        Ok(())
    }

    /// Moves the selected node into the delete confirmation step.
    pub fn request_delete(&mut self) -> Result<String, SurfaceError> {
        self.surface.request_delete()
    }

    /// Runs the deletion that was requested and confirmed. Returns the removed id.
    pub fn confirm_delete(&mut self) -> Result<String, SurfaceError> {
        let id = self.surface.confirm_delete()?;
        self.delete_node(&id);
        Ok(id)
    }

    /// Backs out of the current surface step.
    pub fn cancel(&mut self) {
        self.surface.cancel();
    }

    /// Removes a node and its edges, closes the edit surface and clears the selection.
    pub fn delete_node(&mut self, id: &str) {
        self.graph = ops::delete_node(&self.graph, id);
        self.surface.close();
        tracing::info!(node = %id, nodes = self.graph.nodes.len(), "node deleted");
    }

    pub fn resolve_parent(&self, node_id: &str) -> Option<&NodeRecord> {
        ops::resolve_parent(&self.graph, node_id)
    }

    /// Running a workflow is not supported; the request is only logged.
    pub fn run(&self) {
        tracing::info!(
            nodes = self.graph.nodes.len(),
            edges = self.graph.edges.len(),
            "running agent with current graph configuration"
        );
    }
}
