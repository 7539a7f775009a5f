//! # openai-client
//!
//! Thin wrapper over `async-openai`: chat completion (all choices + usage),
//! streamed chat completion as a token stream, image generation, and audio
//! transcription. Remote failures are classified into [`OpenAIApiError`];
//! conversation bookkeeping lives upstream in `chat-session`.

use async_openai::{types::CreateChatCompletionRequestArgs, Client};
use futures::StreamExt;
use std::pin::Pin;
use std::sync::Arc;
use tracing::instrument;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, ImageSize,
};

mod audio;
mod error;
mod image;

pub use error::OpenAIApiError;
pub use image::parse_image_size;

use error::classify;

/// Generation parameters sent with every chat request.
#[derive(Debug, Clone)]
pub struct ChatParams {
    pub model: String,
    pub temperature: f32,
    pub n_choices: u8,
    pub max_tokens: u32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl Default for ChatParams {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 1.0,
            n_choices: 1,
            max_tokens: 1200,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
        }
    }
}

/// One completion choice returned by the remote boundary.
#[derive(Debug, Clone)]
pub struct ChatChoice {
    pub content: String,
}

/// Token accounting reported by the remote boundary for one request.
#[derive(Debug, Clone, Copy)]
pub struct TokenUsage {
    pub total: u32,
    pub prompt: u32,
    pub completion: u32,
}

/// Result of a non-streamed chat request: all choices plus optional usage.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<TokenUsage>,
}

/// Lazy, single-pass, forward-only sequence of partial-content fragments from a
/// streamed chat request.
pub type TokenStream = Pin<Box<dyn futures::Stream<Item = Result<String, OpenAIApiError>> + Send>>;

/// Client for an OpenAI-compatible API. Cheap to clone; the inner HTTP client
/// is shared.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    image_size: ImageSize,
}

impl OpenAIClient {
    pub fn new(api_key: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            image_size: ImageSize::S512x512,
        }
    }

    /// Custom base URL for compatible third-party endpoints.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            image_size: ImageSize::S512x512,
        }
    }

    /// Sets the size used by [`OpenAIClient::generate_image`].
    pub fn with_image_size(mut self, size: ImageSize) -> Self {
        self.image_size = size;
        self
    }

    pub(crate) fn inner(&self) -> &Client<async_openai::config::OpenAIConfig> {
        &self.client
    }

    pub(crate) fn image_size(&self) -> ImageSize {
        self.image_size
    }

    fn build_request(
        params: &ChatParams,
        messages: Vec<ChatCompletionRequestMessage>,
        stream: bool,
    ) -> Result<async_openai::types::CreateChatCompletionRequest, OpenAIApiError> {
        CreateChatCompletionRequestArgs::default()
            .model(&params.model)
            .messages(messages)
            .temperature(params.temperature)
            .n(params.n_choices)
            .max_tokens(params.max_tokens)
            .presence_penalty(params.presence_penalty)
            .frequency_penalty(params.frequency_penalty)
            .stream(stream)
            .build()
            .map_err(classify)
    }

    /// Non-streamed chat completion: returns every choice plus token usage.
    #[instrument(skip(self, messages))]
    pub async fn chat_completion(
        &self,
        params: &ChatParams,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<ChatOutcome, OpenAIApiError> {
        let request = Self::build_request(params, messages, false)?;
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify)?;

        let choices = response
            .choices
            .into_iter()
            .map(|c| ChatChoice {
                content: c.message.content.unwrap_or_default(),
            })
            .collect();
        let usage = response.usage.map(|u| TokenUsage {
            total: u.total_tokens,
            prompt: u.prompt_tokens,
            completion: u.completion_tokens,
        });

        Ok(ChatOutcome { choices, usage })
    }

    /// Streamed chat completion: returns a lazy stream of content fragments.
    /// Fragments of the first choice only; empty deltas come through as empty
    /// strings and are for the consumer to skip.
    #[instrument(skip(self, messages))]
    pub async fn chat_completion_stream(
        &self,
        params: &ChatParams,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<TokenStream, OpenAIApiError> {
        let request = Self::build_request(params, messages, true)?;
        let stream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(classify)?;

        let fragments = stream.map(|item| match item {
            Ok(chunk) => Ok(chunk
                .choices
                .first()
                .and_then(|c| c.delta.content.clone())
                .unwrap_or_default()),
            Err(e) => Err(classify(e)),
        });

        Ok(Box::pin(fragments))
    }
}
