//! In-memory conversation histories: one ordered message log per
//! (chat id, function), seeded with the system prompt.
//!
//! Append-only except for [`HistoryStore::reset`]. Lazy get-or-create is
//! explicit here: `append`/`history` initialize a chat on first touch instead
//! of requiring a prior `reset`. No persistence and no eviction; the table
//! lives for the process lifetime.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default system instruction seeding every history.
pub const DEFAULT_ASSISTANT_PROMPT: &str = "You are a helpful assistant.";

/// Role of a message, one-to-one with the chat API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message, one-to-one with one element of the API `messages`
/// array. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Named conversational mode with its own independent history per chat.
/// Closed set; parsing any other name fails with [`UnknownFunction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatFunction {
    Assistant,
    Polish,
    Translate,
    Diction,
}

impl ChatFunction {
    pub const ALL: [ChatFunction; 4] = [
        ChatFunction::Assistant,
        ChatFunction::Polish,
        ChatFunction::Translate,
        ChatFunction::Diction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatFunction::Assistant => "assistant",
            ChatFunction::Polish => "polish",
            ChatFunction::Translate => "translate",
            ChatFunction::Diction => "diction",
        }
    }
}

impl fmt::Display for ChatFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a function name outside the closed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown chat function: {0}")]
pub struct UnknownFunction(pub String);

impl FromStr for ChatFunction {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assistant" => Ok(ChatFunction::Assistant),
            "polish" => Ok(ChatFunction::Polish),
            "translate" => Ok(ChatFunction::Translate),
            "diction" => Ok(ChatFunction::Diction),
            other => Err(UnknownFunction(other.to_string())),
        }
    }
}

/// Session table: chat id → function → ordered message log.
pub struct HistoryStore {
    assistant_prompt: String,
    sessions: HashMap<i64, HashMap<ChatFunction, Vec<ChatMessage>>>,
}

fn seeded_histories(prompt: &str) -> HashMap<ChatFunction, Vec<ChatMessage>> {
    ChatFunction::ALL
        .iter()
        .map(|f| (*f, vec![ChatMessage::system(prompt)]))
        .collect()
}

impl HistoryStore {
    pub fn new(assistant_prompt: impl Into<String>) -> Self {
        Self {
            assistant_prompt: assistant_prompt.into(),
            sessions: HashMap::new(),
        }
    }

    /// Replaces the chat's histories with fresh ones holding only the system
    /// message. Idempotent.
    pub fn reset(&mut self, chat_id: i64) {
        self.sessions
            .insert(chat_id, seeded_histories(&self.assistant_prompt));
    }

    fn entry(&mut self, chat_id: i64, function: ChatFunction) -> &mut Vec<ChatMessage> {
        let prompt = &self.assistant_prompt;
        self.sessions
            .entry(chat_id)
            .or_insert_with(|| seeded_histories(prompt))
            .entry(function)
            .or_insert_with(|| vec![ChatMessage::system(prompt)])
    }

    /// Appends a message to the end of the (chat, function) log, creating the
    /// chat's histories on first touch.
    pub fn append(&mut self, chat_id: i64, function: ChatFunction, role: Role, content: &str) {
        let message = ChatMessage {
            role,
            content: content.to_string(),
        };
        self.entry(chat_id, function).push(message);
    }

    /// The ordered message log for (chat, function), creating the chat's
    /// histories on first touch. System message first, then appends in call
    /// order.
    pub fn history(&mut self, chat_id: i64, function: ChatFunction) -> &[ChatMessage] {
        self.entry(chat_id, function)
    }
}
