//! Unit tests for core Stepflow types.
mod common;
use stepflow::editor::{IdGenerator, SequentialIds, SurfaceState, clean_conditions};
use stepflow::error::*;
use stepflow::graph::*;

#[test]
fn test_edge_id_is_deterministic() {
    assert_eq!(edge_id("1", "2"), "1->2");
    let edge = EdgeRecord::between("a", "b", vec![]);
    assert_eq!(edge.id, "a->b");
    assert!(edge.touches("a"));
    assert!(edge.touches("b"));
    assert!(!edge.touches("c"));
}

#[test]
fn test_effective_parent() {
    assert_eq!(effective_parent(None), None);
    assert_eq!(effective_parent(Some("none")), None);
    assert_eq!(effective_parent(Some("  ")), None);
    assert_eq!(effective_parent(Some(" 7 ")), Some("7"));
    assert_eq!(NodeRecord::new("2", "B", "ai").with_parent("1", vec![]).declared_parent(), Some("1"));
}

#[test]
fn test_clean_conditions() {
    let cleaned = clean_conditions(vec![" Success ".to_string(), "".to_string(), " ".to_string()]);
    assert_eq!(cleaned, vec!["Success".to_string()]);
}

#[test]
fn test_graph_queries() {
    let mut graph = Graph::new();
    graph.nodes.push(NodeRecord::new("1", "A", "trigger"));
    graph.nodes.push(NodeRecord::new("2", "B", "ai").with_parent("1", vec![]));
    graph.nodes.push(NodeRecord::new("3", "C", "email").with_parent("1", vec![]));
    graph.edges.push(EdgeRecord::between("1", "2", vec![]));
    graph.edges.push(EdgeRecord::between("1", "3", vec![]));

    let children: Vec<&str> = graph.children("1").into_iter().map(|n| n.id.as_str()).collect();
    assert_eq!(children, vec!["2", "3"]);
    assert_eq!(graph.roots().len(), 1);
    assert_eq!(graph.in_degrees()["1"], 0);
    assert_eq!(graph.in_degrees()["3"], 1);
    assert!(graph.is_forest());
    assert!(graph.violations().is_empty());
    assert!(graph.edge("1->3").is_some());
}

#[test]
fn test_violations_are_reported() {
    let mut graph = Graph::new();
    graph.nodes.push(NodeRecord::new("1", "A", "trigger"));
    graph.nodes.push(NodeRecord::new("1", "A again", "trigger"));
    graph.nodes.push(NodeRecord::new("2", "B", "ai").with_parent("2", vec![]));
    graph.nodes.push(NodeRecord::new("3", "C", "ai").with_parent("9", vec![]));
    graph.edges.push(EdgeRecord::between("1", "3", vec![]));
    graph.edges.push(EdgeRecord::between("2", "3", vec![]));
    graph.edges.push(EdgeRecord::between("2", "2", vec![]));
    graph.edges.push(EdgeRecord::between("4", "2", vec![]));

    let violations = graph.violations();
    assert!(violations.contains(&GraphViolation::DuplicateNodeId("1".to_string())));
    assert!(violations.contains(&GraphViolation::SelfParent("2".to_string())));
    assert!(violations.contains(&GraphViolation::DanglingParent {
        node_id: "3".to_string(),
        parent_id: "9".to_string(),
    }));
    assert!(violations.contains(&GraphViolation::MultipleParents {
        node_id: "3".to_string(),
        sources: vec!["1".to_string(), "2".to_string()],
    }));
    assert!(violations.contains(&GraphViolation::SelfLoop {
        edge_id: "2->2".to_string(),
        node_id: "2".to_string(),
    }));
    assert!(violations.contains(&GraphViolation::DanglingEdge {
        edge_id: "4->2".to_string(),
        missing_node_id: "4".to_string(),
    }));
    assert!(!graph.is_forest());

    let text = GraphViolation::MultipleParents {
        node_id: "3".to_string(),
        sources: vec!["1".to_string(), "2".to_string()],
    }
    .to_string();
    assert_eq!(text, "node '3' has 2 inbound edges (from 1, 2)");
}

#[test]
fn test_sequential_ids() {
    let mut ids = SequentialIds::new("step-");
    assert_eq!(ids.next_id(), "step-1");
    assert_eq!(ids.next_id(), "step-2");
}

#[test]
fn test_surface_transitions() {
    let mut surface = SurfaceState::default();
    assert_eq!(surface.selected(), None);

    surface.open_add().unwrap();
    assert_eq!(surface, SurfaceState::Adding);
    assert!(surface.select("1").is_err());
    surface.close();

    surface.select("1").unwrap();
    surface.select("2").unwrap();
    assert_eq!(surface.selected(), Some("2"));
    assert_eq!(surface.request_delete().unwrap(), "2");
    assert!(surface.select("1").is_err());
    assert_eq!(surface.to_string(), "confirming deletion of node '2'");
    assert_eq!(surface.confirm_delete().unwrap(), "2");
    assert_eq!(surface, SurfaceState::Idle);
}

#[test]
fn test_error_display() {
    assert_eq!(
        ValidationError::UnknownParent {
            node_id: "2".to_string(),
            parent_id: "9".to_string(),
        }
        .to_string(),
        "Parent node '9' of node '2' does not exist"
    );
    assert_eq!(
        ExtractionError::Status {
            status: 502,
            message: "bad gateway".to_string(),
        }
        .to_string(),
        "Step extraction service returned status 502: bad gateway"
    );

    let wrapped: WorkflowError = ValidationError::EmptyLabel.into();
    assert_eq!(wrapped.to_string(), "Node label must not be empty");

    let construction = ConstructionError::TypeValidation(vec![InvalidStep {
        step_id: "4".to_string(),
        type_name: "bogus".to_string(),
    }]);
    assert_eq!(
        construction.to_string(),
        "1 step(s) reference unregistered node types: '4' (type 'bogus')"
    );
}

#[test]
fn test_parent_edge_outlives_the_lookup_key() {
    let mut graph = Graph::new();
    graph.nodes.push(NodeRecord::new("1", "A", "trigger"));
    graph.nodes.push(NodeRecord::new("2", "B", "ai").with_parent("1", vec![]));
    graph.edges.push(EdgeRecord::between("1", "2", vec![]));

    let edge = {
        let key = String::from("2");
        graph.parent_edge(&key)
    };
    assert_eq!(edge.map(|e| e.source.as_str()), Some("1"));

    let inbound: Vec<&EdgeRecord> = {
        let key = String::from("2");
        graph.edges_into(&key).collect::<Vec<_>>()
    };
    assert_eq!(inbound.len(), 1);
}

#[test]
fn test_parent_mismatch_is_reported() {
    let mut graph = Graph::new();
    graph.nodes.push(NodeRecord::new("1", "A", "trigger"));
    graph.nodes.push(NodeRecord::new("2", "B", "ai"));
    graph.nodes.push(NodeRecord::new("3", "C", "email").with_parent("1", vec![]));
    graph.edges.push(EdgeRecord::between("2", "3", vec![]));

    let violations = graph.violations();
    assert_eq!(
        violations,
        vec![GraphViolation::ParentMismatch {
            node_id: "3".to_string(),
            declared: Some("1".to_string()),
            derived: Some("2".to_string()),
        }]
    );
    assert_eq!(
        violations[0].to_string(),
        "node '3' declares parent '1' but its inbound edge comes from '2'"
    );
}
