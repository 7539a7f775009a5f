//! # gptbot-core
//!
//! Core types shared by every gptbot crate: message/user/chat types, the
//! [`Handler`] and [`Middleware`] traits for the handler chain, the
//! transport-agnostic [`Bot`] trait, error types, and tracing setup.
//! No Telegram or OpenAI dependency lives here.

mod bot;
mod error;
mod logger;
mod types;

pub use bot::Bot;
pub use error::{GptbotError, Result};
pub use logger::init_tracing;
pub use types::{
    Attachment, AttachmentKind, Chat, Handler, HandlerResponse, Message, MessageDirection,
    Middleware, User,
};
