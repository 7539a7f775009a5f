//! Mock implementation of [`gptbot_core::Bot`] for integration tests.
//!
//! Records every outbound call so tests can assert on the sequence of sends
//! and edits without hitting Telegram.

use async_trait::async_trait;
use gptbot_core::{Bot, Chat, Message, Result};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCall {
    Send { chat_id: i64, text: String },
    Reply { chat_id: i64, text: String },
    Edit { message_id: String, text: String },
    Photo { chat_id: i64, url: String },
    Download { file_id: String, dest: String },
}

/// Mock Bot recording calls in order. `send_message_and_return_id` returns a
/// fixed placeholder id; `download_file` writes a dummy payload so downstream
/// file handling has something to work on.
pub struct MockBot {
    placeholder_id: String,
    calls: Mutex<Vec<BotCall>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            placeholder_id: "1".to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: BotCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(BotCall::Send {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(BotCall::Reply {
            chat_id: message.chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn edit_message(&self, _chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record(BotCall::Edit {
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        self.record(BotCall::Send {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(self.placeholder_id.clone())
    }

    async fn send_photo_url(&self, chat: &Chat, url: &str) -> Result<()> {
        self.record(BotCall::Photo {
            chat_id: chat.id,
            url: url.to_string(),
        });
        Ok(())
    }

    async fn download_file(&self, file_id: &str, dest: &Path) -> Result<()> {
        self.record(BotCall::Download {
            file_id: file_id.to_string(),
            dest: dest.to_string_lossy().into_owned(),
        });
        tokio::fs::write(dest, b"audio-bytes").await?;
        Ok(())
    }
}
