//! Tests for chat sessions, request tickets and the handoff to the editor.
mod common;
use common::*;
use stepflow::chat::*;
use stepflow::error::{ExtractionError, ValidationError, WorkflowError};
use stepflow::prelude::*;
use stepflow::session::GRAPH_KEY;
use tokio_test::block_on;

#[test]
fn test_submit_builds_graph_and_replies() {
    let extractor = ScriptedExtractor::new(vec![Ok(two_steps())]);
    let mut session = ChatSession::default();

    let outcome = block_on(session.submit("  scrape listings into a sheet ", &extractor, &TYPES)).unwrap();

    assert!(matches!(outcome, ReplyOutcome::Applied { nodes: 2, edges: 1 }));
    assert_eq!(session.graph().nodes.len(), 2);
    assert!(!session.is_loading());
    assert_eq!(*extractor.seen.lock().unwrap(), vec!["scrape listings into a sheet".to_string()]);

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[0].content, "scrape listings into a sheet");
    assert_eq!(messages[1].sender, Sender::Assistant);
    assert_eq!(session.histories().current().title, "scrape listings into a sheet");
}

#[test]
fn test_failed_extraction_keeps_graph_and_apologizes() {
    let extractor = ScriptedExtractor::new(vec![
        Ok(two_steps()),
        Err(ExtractionError::Status {
            status: 500,
            message: "boom".to_string(),
        }),
    ]);
    let mut session = ChatSession::default();
    block_on(session.submit("first", &extractor, &TYPES)).unwrap();
    let before = session.graph().clone();

    let outcome = block_on(session.submit("second", &extractor, &TYPES)).unwrap();

    assert!(matches!(
        outcome,
        ReplyOutcome::Failed(WorkflowError::Extraction(ExtractionError::Status { status: 500, .. }))
    ));
    assert_eq!(session.graph(), &before);
    assert_eq!(session.messages().last().unwrap().content, APOLOGY);
    assert!(!session.is_loading());
}

#[test]
fn test_invalid_types_do_not_replace_graph() {
    let extractor = ScriptedExtractor::new(vec![Ok(vec![Step::new("1", "Odd", "bogus", &[])])]);
    let mut session = ChatSession::default();

    let outcome = block_on(session.submit("do something odd", &extractor, &TYPES)).unwrap();

    assert!(matches!(outcome, ReplyOutcome::Failed(WorkflowError::Construction(_))));
    assert!(session.graph().is_empty());
}

#[test]
fn test_blank_message_is_rejected() {
    let mut session = ChatSession::default();
    assert!(matches!(
        session.begin("   "),
        Err(WorkflowError::Validation(ValidationError::EmptyMessage))
    ));
    assert!(session.messages().is_empty());
    assert!(!session.is_loading());
}

#[test]
fn test_second_request_while_pending_is_busy() {
    let mut session = ChatSession::default();
    let ticket = session.begin("first").unwrap();
    assert!(session.is_loading());
    assert_eq!(session.pending(), Some(ticket));

    assert!(matches!(
        session.begin("second"),
        Err(WorkflowError::Extraction(ExtractionError::Busy))
    ));
    assert_eq!(session.messages().len(), 1);

    assert!(session.complete(ticket, Ok(two_steps()), &TYPES).is_applied());
    assert!(session.begin("second").is_ok());
}

#[test]
fn test_reply_after_reset_is_stale() {
    let mut session = ChatSession::default();
    let ticket = session.begin("build me a scraper").unwrap();

    session.reset();
    assert!(!session.is_loading());

    let outcome = session.complete(ticket, Ok(two_steps()), &TYPES);
    assert!(matches!(outcome, ReplyOutcome::Stale));
    assert!(session.graph().is_empty());
    assert!(session.messages().is_empty());
}

#[test]
fn test_only_latest_ticket_applies() {
    let mut session = ChatSession::default();
    let old = session.begin("first").unwrap();
    session.start_new_chat();
    let new = session.begin("second").unwrap();
    assert_ne!(old, new);

    assert!(matches!(
        session.complete(old, Ok(two_steps()), &TYPES),
        ReplyOutcome::Stale
    ));
    assert!(session.is_loading());

    let diamond = diamond_steps();
    assert!(matches!(
        session.complete(new, Ok(diamond), &TYPES),
        ReplyOutcome::Applied { nodes: 4, .. }
    ));
    assert!(matches!(
        session.complete(new, Ok(two_steps()), &TYPES),
        ReplyOutcome::Stale
    ));
    assert_eq!(session.graph().nodes.len(), 4);
}

#[test]
fn test_chat_histories() {
    let mut session = ChatSession::default();
    let first = session.histories().current_id();
    session.begin("scrape houses").unwrap();

    let second = session.start_new_chat();
    assert_ne!(first, second);
    assert!(session.messages().is_empty());
    assert_eq!(session.histories().current().title, format!("New Workflow {}", second));

    assert!(session.select_chat(first));
    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.histories().current().title, "scrape houses");
    assert!(!session.select_chat(99));
    assert_eq!(session.histories().chats().len(), 2);
}

#[test]
fn test_hand_off_and_restore() {
    let extractor = ScriptedExtractor::new(vec![Ok(two_steps())]);
    let mut session = ChatSession::default();
    block_on(session.submit("scrape listings", &extractor, &TYPES)).unwrap();

    let mut bridge = SessionBridge::in_memory();
    session.hand_off(&mut bridge).unwrap();

    let restored = ChatSession::restore(&mut bridge, GraphConstructor::default());
    assert_eq!(restored.graph(), session.graph());
    assert_eq!(restored.messages(), session.messages());
    assert!(bridge.store().is_empty());

    let mut again = SessionBridge::in_memory();
    assert!(again.take(GRAPH_KEY).unwrap().is_none());
    let empty = ChatSession::restore(&mut again, GraphConstructor::default());
    assert!(empty.graph().is_empty());
    assert!(empty.messages().is_empty());
}

#[test]
fn test_editor_picks_up_bridged_graph() {
    let extractor = ScriptedExtractor::new(vec![Ok(two_steps())]);
    let mut session = ChatSession::default();
    block_on(session.submit("scrape listings", &extractor, &TYPES)).unwrap();

    let mut bridge = SessionBridge::in_memory();
    session.hand_off(&mut bridge).unwrap();

    let mut editor = editor_for(bridge.take_or_empty(GRAPH_KEY));
    editor
        .add_node(NodeDraft::new("Notify", "email").with_parent("2", vec![]))
        .unwrap();
    assert_eq!(editor.graph().nodes.len(), 3);
    assert_healthy(editor.graph());
}
