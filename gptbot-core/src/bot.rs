//! Transport-agnostic bot abstraction for sending and editing messages.
//!
//! The Telegram implementation lives in `gptbot-telegram`; tests use recording
//! mocks of this trait.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;
use std::path::Path;

/// Abstraction for outbound operations against the messaging platform.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;

    /// Edits an already-sent message (e.g. for streamed replies: send then edit).
    /// `message_id` is transport-specific (Telegram numeric string).
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;

    /// Sends a message and returns its id for later `edit_message` when streaming.
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;

    /// Sends a photo by remote URL (e.g. a generated image).
    async fn send_photo_url(&self, chat: &Chat, url: &str) -> Result<()>;

    /// Downloads a transport file (voice/audio) to the given local path.
    async fn download_file(&self, file_id: &str, dest: &Path) -> Result<()>;
}
