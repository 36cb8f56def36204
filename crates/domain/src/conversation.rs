//! Per-airport conversation history sent to the chat backend.
//!
//! A context always starts with one intro message that is never removed.
//! Each pilot turn appends a situational update followed by the pilot's
//! message; each successful backend reply appends one controller message.
//!
//! Before a turn is appended the history is trimmed:
//! 1. every earlier situational update is dropped (the new one supersedes them)
//! 2. while more than [`MAX_ENTRIES_BEFORE_TURN`] entries remain, the oldest
//!    exchange after the intro (a pilot message and the replies that follow it)
//!    is dropped
//!
//! So the history holds at most 4 entries before an append and at most 6
//! right after it.

use serde::{Deserialize, Serialize};

/// Upper bound on the history length right before a new turn is appended.
pub const MAX_ENTRIES_BEFORE_TURN: usize = 4;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// What a history entry is, beyond its wire role.
///
/// Intro and situational updates are both `system` messages; only the
/// latter are ever superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Intro,
    SituationalUpdate,
    Pilot,
    Controller,
}

impl EntryKind {
    pub fn role(&self) -> MessageRole {
        match self {
            EntryKind::Intro | EntryKind::SituationalUpdate => MessageRole::System,
            EntryKind::Pilot => MessageRole::User,
            EntryKind::Controller => MessageRole::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ContextEntry {
    kind: EntryKind,
    content: String,
}

/// Ordered message history for one airport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationContext {
    entries: Vec<ContextEntry>,
}

impl ConversationContext {
    /// Start a context with its permanent intro message.
    pub fn new(intro: impl Into<String>) -> Self {
        Self {
            entries: vec![ContextEntry {
                kind: EntryKind::Intro,
                content: intro.into(),
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: the intro is always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn kinds(&self) -> Vec<EntryKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    /// Trim, then append the situational update and the pilot's message.
    pub fn begin_turn(&mut self, situational_update: impl Into<String>, pilot: impl Into<String>) {
        self.trim();
        self.entries.push(ContextEntry {
            kind: EntryKind::SituationalUpdate,
            content: situational_update.into(),
        });
        self.entries.push(ContextEntry {
            kind: EntryKind::Pilot,
            content: pilot.into(),
        });
    }

    /// Append the controller's reply.
    pub fn record_reply(&mut self, content: impl Into<String>) {
        self.entries.push(ContextEntry {
            kind: EntryKind::Controller,
            content: content.into(),
        });
    }

    /// The full history in backend order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.entries
            .iter()
            .map(|e| ChatMessage {
                role: e.kind.role(),
                content: e.content.clone(),
            })
            .collect()
    }

    fn trim(&mut self) {
        self.entries
            .retain(|e| e.kind != EntryKind::SituationalUpdate);
        while self.entries.len() > MAX_ENTRIES_BEFORE_TURN {
            self.drop_oldest_exchange();
        }
    }

    fn drop_oldest_exchange(&mut self) {
        if self.entries.len() <= 1 {
            return;
        }
        self.entries.remove(1);
        while self
            .entries
            .get(1)
            .is_some_and(|e| e.kind == EntryKind::Controller)
        {
            self.entries.remove(1);
        }
    }
}
