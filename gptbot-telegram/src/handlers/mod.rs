//! Middleware and handlers making up the bot's chain.
//!
//! Order in the assembled chain: logging and auth middleware (plus the
//! optional polish middleware) wrap the handler phase; the command,
//! transcribe, and chat handlers run until one stops the chain.

mod auth;
mod chat;
mod command;
mod logging;
mod polish;
mod transcribe;

pub use auth::{AllowedUsers, AuthMiddleware, DISALLOWED_MESSAGE};
pub use chat::ChatHandler;
pub use command::{CommandHandler, ImageApi, HELP_TEXT};
pub use logging::LoggingMiddleware;
pub use polish::{PolishMiddleware, POLISH_PROMPT};
pub use transcribe::{TranscribeHandler, Transcriber, TRANSCRIBE_FAILED_MESSAGE};
