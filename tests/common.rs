//! Common test utilities: step fixtures, prebuilt graphs and deterministic fakes.
use futures::future::BoxFuture;
use std::sync::Mutex;
use stepflow::editor::SequentialIds;
use stepflow::error::{ExtractionError, RegistryError};
use stepflow::prelude::*;
use stepflow::registry::NodeCategory;

/// Node types accepted by the fixtures.
#[allow(dead_code)]
pub const TYPES: [&str; 6] = ["trigger", "scraper", "filter", "sheets", "email", "ai"];

/// `1 Scrape (scraper)` -> `2 Send (sheets)`.
#[allow(dead_code)]
pub fn two_steps() -> Vec<Step> {
    vec![
        Step::new("1", "Scrape", "scraper", &[]),
        Step::new("2", "Send", "sheets", &["1"]),
    ]
}

/// A diamond: `3` depends on both `1` and `2`.
#[allow(dead_code)]
pub fn diamond_steps() -> Vec<Step> {
    vec![
        Step::new("1", "Fetch Listings", "scraper", &[]),
        Step::new("2", "Check Inbox", "trigger", &[]),
        Step::new("3", "Summarize", "ai", &["1", "2"]),
        Step::new("4", "Mail Summary", "email", &["3"]),
    ]
}

/// The graph built from [`two_steps`].
#[allow(dead_code)]
pub fn two_node_graph() -> Graph {
    GraphConstructor::default()
        .construct(&two_steps(), &TYPES)
        .expect("fixture steps are valid")
}

/// An editor over `graph` that assigns ids `n1`, `n2`, ...
#[allow(dead_code)]
pub fn editor_for(graph: Graph) -> GraphEditor<[&'static str; 6], SequentialIds> {
    GraphEditor::with_id_generator(graph, TYPES, SequentialIds::new("n"))
}

#[allow(dead_code)]
pub fn conditions(items: &[&str]) -> Vec<String> {
    items.iter().map(|c| c.to_string()).collect()
}

/// Asserts the structural rules every editor-produced graph must satisfy.
#[allow(dead_code)]
pub fn assert_healthy(graph: &Graph) {
    let violations = graph.violations();
    assert!(
        violations.is_empty(),
        "unexpected violations: {:?}",
        violations
    );
    assert!(graph.is_forest());
}

/// Replays a scripted sequence of extraction results, one per call.
#[allow(dead_code)]
pub struct ScriptedExtractor {
    replies: Mutex<Vec<Result<Vec<Step>, ExtractionError>>>,
    pub seen: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedExtractor {
    pub fn new(replies: Vec<Result<Vec<Step>, ExtractionError>>) -> Self {
        let mut replies = replies;
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl StepExtractor for ScriptedExtractor {
    fn extract<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<Vec<Step>, ExtractionError>> {
        Box::pin(async move {
            self.seen.lock().unwrap().push(message.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(ExtractionError::Request("no scripted reply".to_string())))
        })
    }
}

/// A node type source that always fails.
#[allow(dead_code)]
pub struct DownSource;

impl NodeTypeSource for DownSource {
    fn name(&self) -> &str {
        "down"
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<NodeTypeDescriptor>, RegistryError>> {
        Box::pin(async {
            Err(RegistryError::Unreachable {
                source_name: "down".to_string(),
                message: "connection refused".to_string(),
            })
        })
    }
}

/// A node type source serving a fixed list.
#[allow(dead_code)]
pub struct FixedSource(pub Vec<NodeTypeDescriptor>);

impl NodeTypeSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<NodeTypeDescriptor>, RegistryError>> {
        let types = self.0.clone();
        Box::pin(async move { Ok(types) })
    }
}

#[allow(dead_code)]
pub fn descriptor(id: &str) -> NodeTypeDescriptor {
    NodeTypeDescriptor::new(id, id, "", NodeCategory::Action)
}
