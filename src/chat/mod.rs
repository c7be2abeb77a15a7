//! The chat side of a workflow session: the transcript, the single in-flight
//! extraction, and the graph built from its reply.
//!
//! An extraction is started with [`ChatSession::begin`], which hands out a
//! [`RequestTicket`], and finished with [`ChatSession::complete`]. Only the ticket
//! of the currently pending request is honored; a reply that arrives after the
//! chat was reset or switched is dropped as stale instead of overwriting a graph
//! that no longer belongs to it. [`ChatSession::submit`] runs both halves against
//! a [`StepExtractor`].

pub mod history;
pub mod message;

pub use history::*;
pub use message::*;

use crate::construction::GraphConstructor;
use crate::error::{ExtractionError, ValidationError, WorkflowError};
use crate::extract::{Step, StepExtractor};
use crate::graph::Graph;
use crate::registry::TypeValidator;
use crate::session::{GRAPH_KEY, SessionBridge, SessionStore};

/// Shown in place of a workflow when extraction or construction fails.
pub const APOLOGY: &str =
    "Sorry, I couldn't turn that into a workflow. Please try rephrasing your request.";

/// Identifies one extraction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What happened to an extraction reply.
#[derive(Debug)]
pub enum ReplyOutcome {
    /// The reply replaced the session graph.
    Applied { nodes: usize, edges: usize },
    /// The reply was an error; the graph is unchanged and input is re-enabled.
    Failed(WorkflowError),
    /// The reply belonged to a request that is no longer pending and was ignored.
    Stale,
}

impl ReplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ReplyOutcome::Applied { .. })
    }
}

pub struct ChatSession {
    histories: ChatHistories,
    graph: Graph,
    constructor: GraphConstructor,
    pending: Option<RequestTicket>,
    next_sequence: u64,
    next_message_id: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(GraphConstructor::default())
    }
}

impl ChatSession {
    pub fn new(constructor: GraphConstructor) -> Self {
        Self {
            histories: ChatHistories::new(),
            graph: Graph::new(),
            constructor,
            pending: None,
            next_sequence: 1,
            next_message_id: 1,
        }
    }

    /// Rebuilds a session from whatever the bridge holds, consuming it.
    pub fn restore<S: SessionStore>(
        bridge: &mut SessionBridge<S>,
        constructor: GraphConstructor,
    ) -> Self {
        let messages = bridge.take_transcript();
        let graph = bridge.take_or_empty(GRAPH_KEY);
        let mut session = Self::new(constructor);
        session.next_message_id = messages.len() as u64 + 1;
        session.histories = ChatHistories::with_messages(messages);
        session.graph = graph;
        session
    }

    /// Hands the transcript and graph to the bridge for the editor view.
    pub fn hand_off<S: SessionStore>(
        &self,
        bridge: &mut SessionBridge<S>,
    ) -> Result<(), WorkflowError> {
        bridge.put_transcript(self.messages())?;
        bridge.put(GRAPH_KEY, &self.graph)?;
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.histories.current().messages
    }

    pub fn histories(&self) -> &ChatHistories {
        &self.histories
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<RequestTicket> {
        self.pending
    }

    fn push_message(&mut self, content: &str, sender: Sender) {
        let id = self.next_message_id.to_string();
        self.next_message_id += 1;
        self.histories.record(Message::new(id, content, sender));
    }

    /// Records the user's message and opens an extraction request.
    ///
    /// Fails on a blank message, or while another request is still pending.
    pub fn begin(&mut self, message: &str) -> Result<RequestTicket, WorkflowError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }
        if self.pending.is_some() {
            return Err(ExtractionError::Busy.into());
        }

        self.push_message(message, Sender::User);
        let ticket = RequestTicket(self.next_sequence);
        self.next_sequence += 1;
        self.pending = Some(ticket);
        tracing::debug!(sequence = ticket.sequence(), "extraction started");
        Ok(ticket)
    }

    /// Applies the reply for `ticket`.
    ///
    /// On success the constructed graph replaces the session graph. On failure the
    /// graph is kept and an apology is added to the transcript.
    pub fn complete<V>(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Step>, ExtractionError>,
        types: &V,
    ) -> ReplyOutcome
    where
        V: TypeValidator + ?Sized,
    {
        if self.pending != Some(ticket) {
            tracing::warn!(sequence = ticket.sequence(), "dropping stale extraction reply");
            return ReplyOutcome::Stale;
        }
        self.pending = None;

        let built = result
            .map_err(WorkflowError::from)
            .and_then(|steps| Ok(self.constructor.construct(&steps, types)?));

        match built {
            Ok(graph) => {
                let (nodes, edges) = (graph.nodes.len(), graph.edges.len());
                self.graph = graph;
                self.push_message(&summarize(nodes), Sender::Assistant);
                tracing::info!(sequence = ticket.sequence(), nodes, edges, "extraction applied");
                ReplyOutcome::Applied { nodes, edges }
            }
            Err(err) => {
                tracing::warn!(sequence = ticket.sequence(), "extraction failed: {}", err);
                self.push_message(APOLOGY, Sender::Assistant);
                ReplyOutcome::Failed(err)
            }
        }
    }

    /// Sends `message` through `extractor` and applies the reply.
    pub async fn submit<V>(
        &mut self,
        message: &str,
        extractor: &dyn StepExtractor,
        types: &V,
    ) -> Result<ReplyOutcome, WorkflowError>
    where
        V: TypeValidator + ?Sized,
    {
        let ticket = self.begin(message)?;
        let text = message.trim().to_string();
        let result = extractor.extract(&text).await;
        Ok(self.complete(ticket, result, types))
    }

    /// Clears the open chat and its graph. A reply still in flight becomes stale.
    pub fn reset(&mut self) {
        self.histories.clear_current();
        self.graph = Graph::new();
        self.pending = None;
    }

    /// Opens a new, empty chat. A reply still in flight becomes stale.
    pub fn start_new_chat(&mut self) -> u32 {
        self.pending = None;
        self.graph = Graph::new();
        self.histories.start_new()
    }

    /// Switches to an existing chat. A reply still in flight becomes stale.
    pub fn select_chat(&mut self, id: u32) -> bool {
        if self.histories.select(id).is_none() {
            return false;
        }
        self.pending = None;
        self.graph = Graph::new();
        true
    }
}

fn summarize(nodes: usize) -> String {
    match nodes {
        0 => "I couldn't find any steps to automate in that request.".to_string(),
        1 => "Let me help you create an AI workflow for that. I've drafted 1 step.".to_string(),
        n => format!(
            "Let me help you create an AI workflow for that. I've drafted {} steps.",
            n
        ),
    }
}
