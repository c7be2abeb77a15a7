use super::message::{Message, Sender};
use serde::{Deserialize, Serialize};

const DEFAULT_TITLE: &str = "New Workflow";

/// One conversation. Its title becomes the first user message once one is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistory {
    pub id: u32,
    pub title: String,
    pub messages: Vec<Message>,
}

/// All conversations of a session and which one is open.
#[derive(Debug, Clone)]
pub struct ChatHistories {
    chats: Vec<ChatHistory>,
    current: u32,
}

impl Default for ChatHistories {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatHistories {
    pub fn new() -> Self {
        Self {
            chats: vec![ChatHistory {
                id: 1,
                title: DEFAULT_TITLE.to_string(),
                messages: Vec::new(),
            }],
            current: 1,
        }
    }

    /// Starts with a single chat holding `messages`, e.g. a transcript restored from
    /// the session bridge.
    pub fn with_messages(messages: Vec<Message>) -> Self {
        let mut histories = Self::new();
        for message in messages {
            histories.record(message);
        }
        histories
    }

    pub fn chats(&self) -> &[ChatHistory] {
        &self.chats
    }

    pub fn current_id(&self) -> u32 {
        self.current
    }

    pub fn current(&self) -> &ChatHistory {
        // `chats` is never empty and `current` always names one of them.
        self.chats
            .iter()
            .find(|c| c.id == self.current)
            .unwrap_or(&self.chats[0])
    }

    fn current_mut(&mut self) -> &mut ChatHistory {
        let current = self.current;
        let index = self.chats.iter().position(|c| c.id == current).unwrap_or(0);
        &mut self.chats[index]
    }

    /// Opens a fresh chat and returns its id.
    pub fn start_new(&mut self) -> u32 {
        let id = self.chats.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        self.chats.push(ChatHistory {
            id,
            title: format!("{} {}", DEFAULT_TITLE, id),
            messages: Vec::new(),
        });
        self.current = id;
        id
    }

    /// Switches to chat `id`. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: u32) -> Option<&ChatHistory> {
        if self.chats.iter().any(|c| c.id == id) {
            self.current = id;
            Some(self.current())
        } else {
            None
        }
    }

    /// Appends to the open chat.
    pub fn record(&mut self, message: Message) {
        let chat = self.current_mut();
        if chat.messages.is_empty() && message.sender == Sender::User {
            chat.title = message.content.clone();
        }
        chat.messages.push(message);
    }

    pub fn clear_current(&mut self) {
        self.current_mut().messages.clear();
    }
}
