//! Shared test doubles: recording Bot mock, deterministic flush gates, and a
//! fixed chat boundary.
#![allow(dead_code)]

pub mod mock_bot;

use async_trait::async_trait;
use chat_session::{ChatApi, ChatMessage};
use gptbot_core::{Chat, Message, MessageDirection, User};
use gptbot_telegram::stream_edit::FlushGate;
use openai_client::{ChatChoice, ChatOutcome, ChatParams, OpenAIApiError, TokenStream};

/// Gate that flushes on every fragment.
pub struct AlwaysFlush;

impl FlushGate for AlwaysFlush {
    fn should_flush(&self) -> bool {
        true
    }
}

/// Gate that never flushes mid-stream; only the final flush fires.
pub struct NeverFlush;

impl FlushGate for NeverFlush {
    fn should_flush(&self) -> bool {
        false
    }
}

/// Chat boundary returning a fixed answer and a fixed fragment stream.
pub struct FixedChatApi {
    pub answer: String,
    pub fragments: Vec<String>,
}

#[async_trait]
impl ChatApi for FixedChatApi {
    async fn complete(
        &self,
        _params: &ChatParams,
        _messages: Vec<ChatMessage>,
    ) -> Result<ChatOutcome, OpenAIApiError> {
        Ok(ChatOutcome {
            choices: vec![ChatChoice {
                content: self.answer.clone(),
            }],
            usage: None,
        })
    }

    async fn stream(
        &self,
        _params: &ChatParams,
        _messages: Vec<ChatMessage>,
    ) -> Result<TokenStream, OpenAIApiError> {
        let items: Vec<Result<String, OpenAIApiError>> =
            self.fragments.iter().cloned().map(Ok).collect();
        Ok(Box::pin(futures::stream::iter(items)))
    }
}

/// Builds an inbound text message for tests.
pub fn test_message(user_id: i64, chat_id: i64, content: &str) -> Message {
    Message {
        id: "100".to_string(),
        user: User {
            id: user_id,
            username: Some("tester".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: chat_id,
            chat_type: "Private".to_string(),
        },
        content: content.to_string(),
        direction: MessageDirection::Incoming,
        created_at: chrono::Utc::now(),
        attachment: None,
    }
}
