//! Slash-command handler: `/reset`, `/help`, `/image <prompt>`.
//!
//! Unknown commands fall through to the chat handler.

use async_trait::async_trait;
use chat_session::ChatResponder;
use gptbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use openai_client::{OpenAIApiError, OpenAIClient};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Help menu text.
pub const HELP_TEXT: &str =
    "/reset - Reset conversation\n/image <prompt> - Generate image\n/help - Help menu";

/// Image generation boundary, substitutable in tests.
#[async_trait]
pub trait ImageApi: Send + Sync {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, OpenAIApiError>;
}

#[async_trait]
impl ImageApi for OpenAIClient {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, OpenAIApiError> {
        self.generate_image(prompt).await
    }
}

pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    responder: Arc<ChatResponder>,
    images: Arc<dyn ImageApi>,
}

impl CommandHandler {
    pub fn new(bot: Arc<dyn Bot>, responder: Arc<ChatResponder>, images: Arc<dyn ImageApi>) -> Self {
        Self {
            bot,
            responder,
            images,
        }
    }

    async fn reset(&self, message: &Message) -> Result<HandlerResponse> {
        info!(chat_id = message.chat.id, "step: resetting conversation");
        self.responder.reset(message.chat.id).await;
        self.bot.reply_to(message, "Done!").await?;
        Ok(HandlerResponse::Reply("Done!".to_string()))
    }

    async fn help(&self, message: &Message) -> Result<HandlerResponse> {
        self.bot.reply_to(message, HELP_TEXT).await?;
        Ok(HandlerResponse::Reply(HELP_TEXT.to_string()))
    }

    async fn image(&self, message: &Message, prompt: &str) -> Result<HandlerResponse> {
        if prompt.is_empty() {
            self.bot.reply_to(message, "Please provide a prompt!").await?;
            return Ok(HandlerResponse::Stop);
        }

        info!(chat_id = message.chat.id, "step: image generation requested");
        match self.images.generate(prompt).await {
            Ok(url) => {
                self.bot.send_photo_url(&message.chat, &url).await?;
                Ok(HandlerResponse::Stop)
            }
            Err(e) => {
                warn!(error = %e, "Image generation failed");
                self.bot.reply_to(message, "Failed to generate image").await?;
                Ok(HandlerResponse::Stop)
            }
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let content = message.content.trim();
        if !content.starts_with('/') {
            return Ok(HandlerResponse::Continue);
        }

        if content == "/reset" {
            return self.reset(message).await;
        }
        if content == "/help" {
            return self.help(message).await;
        }
        if let Some(rest) = content.strip_prefix("/image") {
            return self.image(message, rest.trim()).await;
        }

        Ok(HandlerResponse::Continue)
    }
}
