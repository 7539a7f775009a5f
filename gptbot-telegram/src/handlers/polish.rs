//! Polish middleware: Latin-script messages get a revised variant replied
//! before the rest of the chain runs.
//!
//! Uses the non-streamed answer path on the `polish` function, so the
//! revision keeps its own history per chat. Always continues the chain; a
//! polish failure surfaces as error text in the reply, not as a fault.

use async_trait::async_trait;
use chat_session::{ChatFunction, ChatResponder};
use gptbot_core::{Bot, Message, Middleware, Result};
use std::sync::Arc;
use tracing::{info, instrument};

/// Instruction prepended to the text being polished.
pub const POLISH_PROMPT: &str =
    "Revise the following sentences to make them more clear, concise, and coherent.";

pub struct PolishMiddleware {
    responder: Arc<ChatResponder>,
    bot: Arc<dyn Bot>,
}

impl PolishMiddleware {
    pub fn new(responder: Arc<ChatResponder>, bot: Arc<dyn Bot>) -> Self {
        Self { responder, bot }
    }

    /// Only plain Latin-script text is worth polishing; commands and anything
    /// with characters above U+0100 are left alone.
    fn needs_polish(text: &str) -> bool {
        !text.is_empty() && !text.starts_with('/') && text.chars().all(|c| (c as u32) <= 0x100)
    }
}

#[async_trait]
impl Middleware for PolishMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let text = message.content.trim();
        if !Self::needs_polish(text) {
            return Ok(true);
        }

        info!(chat_id = message.chat.id, "step: polishing message");
        let query = format!("{}: {}", POLISH_PROMPT, text);
        let polished = self
            .responder
            .answer(message.chat.id, ChatFunction::Polish, &query)
            .await;
        let reply = format!("{}\n----\n{}", text, polished);
        self.bot.reply_to(message, &reply).await?;

        Ok(true)
    }
}
