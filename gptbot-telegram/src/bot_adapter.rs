//! Wraps teloxide::Bot and implements [`gptbot_core::Bot`]. Production code
//! sends messages via Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use gptbot_core::{Bot as CoreBot, Chat, GptbotError, Message, Result};
use std::path::Path;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, InputFile, MessageId, ReplyParameters};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| GptbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        // Degrades to a plain send when the inbound id is not numeric.
        match message.id.parse::<i32>() {
            Ok(id) => {
                self.bot
                    .send_message(ChatId(message.chat.id), text.to_string())
                    .reply_parameters(ReplyParameters::new(MessageId(id)))
                    .await
                    .map_err(|e| GptbotError::Bot(e.to_string()))?;
                Ok(())
            }
            Err(_) => self.send_message(&message.chat, text).await,
        }
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id: i32 = message_id
            .parse()
            .map_err(|_| GptbotError::Bot(format!("Invalid message_id for edit: {}", message_id)))?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text)
            .await
            .map_err(|e| GptbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| GptbotError::Bot(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn send_photo_url(&self, chat: &Chat, url: &str) -> Result<()> {
        let url = url::Url::parse(url)
            .map_err(|e| GptbotError::Bot(format!("Invalid photo url: {}", e)))?;
        self.bot
            .send_photo(ChatId(chat.id), InputFile::url(url))
            .await
            .map_err(|e| GptbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str, dest: &Path) -> Result<()> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(|e| GptbotError::Bot(e.to_string()))?;
        let mut out = tokio::fs::File::create(dest).await?;
        self.bot
            .download_file(&file.path, &mut out)
            .await
            .map_err(|e| GptbotError::Bot(e.to_string()))?;
        Ok(())
    }
}
