//! [`ChatApi`] implementation backed by [`OpenAIClient`].

use async_trait::async_trait;

use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, ChatOutcome,
    ChatParams, OpenAIApiError, OpenAIClient, TokenStream,
};

use crate::history::{ChatMessage, Role};
use crate::responder::ChatApi;

/// Production chat boundary: converts [`ChatMessage`] logs into wire messages
/// and delegates to [`OpenAIClient`].
pub struct OpenAIChatApi {
    client: OpenAIClient,
}

impl OpenAIChatApi {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }
}

fn to_request_messages(
    messages: Vec<ChatMessage>,
) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIApiError> {
    messages
        .into_iter()
        .map(|m| {
            let converted = match m.role {
                Role::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(m.content)
                    .build()
                    .map(ChatCompletionRequestMessage::System),
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(m.content)
                    .build()
                    .map(ChatCompletionRequestMessage::User),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(m.content)
                    .build()
                    .map(ChatCompletionRequestMessage::Assistant),
            };
            converted.map_err(|e| OpenAIApiError::InvalidRequest(e.to_string()))
        })
        .collect()
}

#[async_trait]
impl ChatApi for OpenAIChatApi {
    async fn complete(
        &self,
        params: &ChatParams,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatOutcome, OpenAIApiError> {
        let messages = to_request_messages(messages)?;
        self.client.chat_completion(params, messages).await
    }

    async fn stream(
        &self,
        params: &ChatParams,
        messages: Vec<ChatMessage>,
    ) -> Result<TokenStream, OpenAIApiError> {
        let messages = to_request_messages(messages)?;
        self.client.chat_completion_stream(params, messages).await
    }
}
