//! # chat-session
//!
//! Per-chat conversation bookkeeping on top of a remote chat-completion
//! boundary:
//!
//! - [`HistoryStore`] — ordered message logs per (chat id, [`ChatFunction`]),
//!   each seeded with the configured system prompt.
//! - [`ChatResponder`] — appends the user query, calls the boundary through
//!   [`ChatApi`], and returns either a finished answer string or a lazy token
//!   stream. Remote failures degrade to user-facing answer text, never to a
//!   fault in the calling handler.

mod history;
mod openai;
mod responder;

pub use history::{
    ChatFunction, ChatMessage, HistoryStore, Role, UnknownFunction, DEFAULT_ASSISTANT_PROMPT,
};
pub use openai::OpenAIChatApi;
pub use responder::{ChatApi, ChatConfig, ChatReply, ChatResponder, NO_RESPONSE_ANSWER};
