//! Graph editing operations.
//!
//! Each operation reads a graph and returns a new one; the input is never touched,
//! so a rejected operation leaves the caller's graph exactly as it was.
//!
//! A node's parent pointer (`parent_id` plus `conditions`) is the single source of
//! truth for its inbound edge. Adding or editing a node regenerates that edge from
//! the pointer instead of patching the edge set, which keeps every node at no more
//! than one inbound edge.

use crate::error::ValidationError;
use crate::graph::{EdgeRecord, Graph, NodeDraft, NodeRecord, Position, effective_parent};
use crate::registry::TypeValidator;
use rand::Rng;

/// Appends a node built from `draft` under the id `id`, plus its parent edge if any.
pub fn add_node<V>(
    graph: &Graph,
    draft: NodeDraft,
    id: String,
    types: &V,
) -> Result<Graph, ValidationError>
where
    V: TypeValidator + ?Sized,
{
    let label = require_label(&draft.label)?;
    require_type(&draft.node_type, types)?;
    if graph.contains_node(&id) {
        return Err(ValidationError::DuplicateNodeId(id));
    }
    let parent = effective_parent(draft.parent_id.as_deref()).map(str::to_string);
    if let Some(parent_id) = &parent {
        require_parent(graph, &id, parent_id)?;
    }

    let node = NodeRecord {
        id,
        label,
        node_type: draft.node_type,
        parent_id: parent,
        conditions: clean_conditions(draft.conditions),
        position: draft.position.unwrap_or_else(drop_position),
    };

    let mut next = graph.clone();
    if let Some(parent_id) = &node.parent_id {
        next.edges.push(EdgeRecord::between(
            parent_id.as_str(),
            node.id.as_str(),
            node.conditions.clone(),
        ));
    }
    tracing::debug!(node = %node.id, parent = ?node.parent_id, "added node");
    next.nodes.push(node);
    Ok(next)
}

/// Replaces the node with `updated.id` and regenerates its inbound edge.
///
/// Every edge targeting the node is removed, including extra ones left by a
/// multi-dependency construction, before the single replacement is added.
pub fn edit_node<V>(graph: &Graph, updated: NodeRecord, types: &V) -> Result<Graph, ValidationError>
where
    V: TypeValidator + ?Sized,
{
    let label = require_label(&updated.label)?;
    let parent = effective_parent(updated.parent_id.as_deref()).map(str::to_string);
    if parent.as_deref() == Some(updated.id.as_str()) {
        return Err(ValidationError::SelfParent(updated.id));
    }
    let index = graph
        .nodes
        .iter()
        .position(|n| n.id == updated.id)
        .ok_or_else(|| ValidationError::NodeNotFound(updated.id.clone()))?;
    require_type(&updated.node_type, types)?;
    if let Some(parent_id) = &parent {
        require_parent(graph, &updated.id, parent_id)?;
    }

    let node = NodeRecord {
        label,
        parent_id: parent,
        conditions: clean_conditions(updated.conditions),
        ..updated
    };

    let mut next = graph.clone();
    let before = next.edges.len();
    next.edges.retain(|e| e.target != node.id);
    if before - next.edges.len() > 1 {
        tracing::debug!(
            node = %node.id,
            removed = before - next.edges.len(),
            "collapsed multiple parents"
        );
    }
    if let Some(parent_id) = &node.parent_id {
        next.edges.push(EdgeRecord::between(
            parent_id.as_str(),
            node.id.as_str(),
            node.conditions.clone(),
        ));
    }
    tracing::debug!(node = %node.id, parent = ?node.parent_id, "edited node");
    next.nodes[index] = node;
    Ok(next)
}

/// Removes a node and every edge touching it. Children become roots unless another
/// inbound edge survives, in which case their parent pointer moves to that edge.
///
/// Deleting an id that is not in the graph returns an identical graph.
pub fn delete_node(graph: &Graph, id: &str) -> Graph {
    if !graph.contains_node(id) {
        tracing::debug!(node = %id, "delete of absent node ignored");
        return graph.clone();
    }

    let mut next = graph.clone();
    next.nodes.retain(|n| n.id != id);
    next.edges.retain(|e| !e.touches(id));
    // A child that kept another inbound edge follows it; the rest become roots.
    let survivors: Vec<(usize, Option<(String, Vec<String>)>)> = next
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.declared_parent() == Some(id))
        .map(|(index, n)| {
            let edge = next.parent_edge(&n.id);
            (index, edge.map(|e| (e.source.clone(), e.conditions.clone())))
        })
        .collect();
    for (index, parent) in survivors {
        let node = &mut next.nodes[index];
        match parent {
            Some((source, conditions)) => {
                node.parent_id = Some(source);
                node.conditions = conditions;
            }
            None => node.parent_id = None,
        }
    }
    tracing::debug!(node = %id, "deleted node");
    next
}

/// The source node of the edge targeting `node_id`, if any.
pub fn resolve_parent<'g>(graph: &'g Graph, node_id: &str) -> Option<&'g NodeRecord> {
    graph
        .parent_edge(node_id)
        .and_then(|edge| graph.node(&edge.source))
}

fn require_label(label: &str) -> Result<String, ValidationError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyLabel)
    } else {
        Ok(trimmed.to_string())
    }
}

fn require_type<V>(node_type: &str, types: &V) -> Result<(), ValidationError>
where
    V: TypeValidator + ?Sized,
{
    if types.is_valid_type(node_type) {
        Ok(())
    } else {
        Err(ValidationError::UnknownType(node_type.to_string()))
    }
}

fn require_parent(graph: &Graph, node_id: &str, parent_id: &str) -> Result<(), ValidationError> {
    if parent_id == node_id {
        return Err(ValidationError::SelfParent(node_id.to_string()));
    }
    if !graph.contains_node(parent_id) {
        return Err(ValidationError::UnknownParent {
            node_id: node_id.to_string(),
            parent_id: parent_id.to_string(),
        });
    }
    Ok(())
}

/// Drops blank conditions and trims the rest.
pub fn clean_conditions(conditions: Vec<String>) -> Vec<String> {
    conditions
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Where a node without an explicit position lands: near the canvas center, jittered
/// so consecutive additions do not stack exactly.
fn drop_position() -> Position {
    let mut rng = rand::rng();
    Position::new(
        250.0 + rng.random::<f64>() * 50.0,
        250.0 + rng.random::<f64>() * 50.0,
    )
}
