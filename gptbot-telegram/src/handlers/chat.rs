//! Default chat handler: any remaining text goes to the assistant function as
//! a streamed reply driven through the stream-edit loop.

use async_trait::async_trait;
use chat_session::{ChatFunction, ChatReply, ChatResponder};
use gptbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::stream_edit::{run_stream_reply, FlushGate};

pub struct ChatHandler {
    bot: Arc<dyn Bot>,
    responder: Arc<ChatResponder>,
    gate: Arc<dyn FlushGate>,
}

impl ChatHandler {
    pub fn new(bot: Arc<dyn Bot>, responder: Arc<ChatResponder>, gate: Arc<dyn FlushGate>) -> Self {
        Self {
            bot,
            responder,
            gate,
        }
    }
}

#[async_trait]
impl Handler for ChatHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let content = message.content.trim();
        if content.is_empty() {
            return Ok(HandlerResponse::Continue);
        }

        info!(chat_id = message.chat.id, "step: chat prompt received");
        let reply = self
            .responder
            .respond(message.chat.id, ChatFunction::Assistant, content, true)
            .await;

        match reply {
            ChatReply::Stream(tokens) => {
                let text =
                    run_stream_reply(self.bot.clone(), &message.chat, tokens, self.gate.as_ref())
                        .await;
                Ok(HandlerResponse::Reply(text))
            }
            ChatReply::Answer(text) => {
                self.bot.reply_to(message, &text).await?;
                Ok(HandlerResponse::Reply(text))
            }
        }
    }
}
