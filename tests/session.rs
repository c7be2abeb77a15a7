//! Tests for the single-read session bridge.
mod common;
use common::*;
use stepflow::chat::{Message, Sender};
use stepflow::error::BridgeError;
use stepflow::session::*;

#[test]
fn test_put_then_take_consumes_entry() {
    let mut bridge = SessionBridge::in_memory();
    let graph = two_node_graph();

    bridge.put(GRAPH_KEY, &graph).unwrap();
    assert_eq!(bridge.store().len(), 1);

    assert_eq!(bridge.take(GRAPH_KEY).unwrap(), Some(graph));
    assert_eq!(bridge.take(GRAPH_KEY).unwrap(), None);
    assert!(bridge.store().is_empty());
}

#[test]
fn test_stored_graph_is_plain_json() {
    let mut bridge = SessionBridge::in_memory();
    bridge.put(GRAPH_KEY, &two_node_graph()).unwrap();

    let raw = bridge.store().get(GRAPH_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["nodes"][1]["type"], "sheets");
    assert_eq!(value["nodes"][1]["parentId"], "1");
    assert_eq!(value["edges"][0]["id"], "1->2");
}

#[test]
fn test_malformed_entry_is_consumed_and_falls_back_to_empty() {
    let mut store = MemoryStore::new();
    store.set(GRAPH_KEY, "{not json".to_string());
    let mut bridge = SessionBridge::new(store.clone());

    assert!(matches!(
        bridge.take(GRAPH_KEY),
        Err(BridgeError::Deserialization { .. })
    ));
    assert_eq!(bridge.take(GRAPH_KEY).unwrap(), None);

    let mut bridge = SessionBridge::new(store);
    let graph = bridge.take_or_empty(GRAPH_KEY);
    assert!(graph.is_empty());
    assert!(graph.edges.is_empty());
    assert!(bridge.store().is_empty());
}

#[test]
fn test_missing_entry_falls_back_to_empty() {
    let mut bridge = SessionBridge::in_memory();
    assert!(bridge.take_or_empty(GRAPH_KEY).is_empty());
}

#[test]
fn test_transcript_round_trip_is_single_read() {
    let mut bridge = SessionBridge::in_memory();
    let messages = vec![
        Message::new("1", "Scrape listings into a sheet", Sender::User),
        Message::new("2", "Drafted 2 steps", Sender::Assistant),
    ];

    bridge.put_transcript(&messages).unwrap();
    let raw = bridge.store().get(MESSAGES_KEY).unwrap();
    assert!(raw.contains(r#""sender":"user""#));

    assert_eq!(bridge.take_transcript(), messages);
    assert!(bridge.take_transcript().is_empty());
}

#[test]
fn test_reset_drops_everything() {
    let mut bridge = SessionBridge::in_memory();
    bridge.put(GRAPH_KEY, &two_node_graph()).unwrap();
    bridge.put_transcript(&[]).unwrap();
    assert_eq!(bridge.store().len(), 2);

    bridge.reset();
    assert!(bridge.into_store().is_empty());
}
