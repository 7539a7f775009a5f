//! Chat responder: history bookkeeping around the chat-completion boundary.
//!
//! The responder owns the [`HistoryStore`] behind a mutex so one instance can
//! be shared across concurrently handled updates. The lock is held only while
//! touching the store, never across a remote call.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::instrument;

use openai_client::{ChatOutcome, ChatParams, OpenAIApiError, TokenStream};

use crate::history::{ChatFunction, ChatMessage, HistoryStore, Role};

/// Answer shown when the remote boundary returns no choices at all.
pub const NO_RESPONSE_ANSWER: &str =
    "⚠️ _An error has occurred_ ⚠️\nPlease try again in a while.";

/// Chat-completion boundary as the responder sees it. The production
/// implementation is [`crate::OpenAIChatApi`]; tests substitute their own.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn complete(
        &self,
        params: &ChatParams,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatOutcome, OpenAIApiError>;

    async fn stream(
        &self,
        params: &ChatParams,
        messages: Vec<ChatMessage>,
    ) -> Result<TokenStream, OpenAIApiError>;
}

/// Responder configuration, fixed at construction.
#[derive(Clone)]
pub struct ChatConfig {
    pub params: ChatParams,
    pub assistant_prompt: String,
    pub show_usage: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            params: ChatParams::default(),
            assistant_prompt: crate::history::DEFAULT_ASSISTANT_PROMPT.to_string(),
            show_usage: false,
        }
    }
}

/// Reply from [`ChatResponder::respond`]: a finished answer string, or a lazy
/// token stream the caller drives itself.
pub enum ChatReply {
    Answer(String),
    Stream(TokenStream),
}

/// Appends queries to the per-(chat, function) history, calls the boundary,
/// and commits the first choice of each finished answer back to the history.
/// Streamed replies are handed to the caller unconsumed and are NOT committed.
pub struct ChatResponder {
    api: Arc<dyn ChatApi>,
    history: Mutex<HistoryStore>,
    config: ChatConfig,
}

impl ChatResponder {
    pub fn new(api: Arc<dyn ChatApi>, config: ChatConfig) -> Self {
        let history = Mutex::new(HistoryStore::new(config.assistant_prompt.clone()));
        Self {
            api,
            history,
            config,
        }
    }

    /// Appends `query` as a user message and asks the boundary for a reply.
    ///
    /// With `stream` set, the token stream is returned as-is; the streamed
    /// answer never enters the history. A failure to even open the stream
    /// degrades to an error answer string.
    #[instrument(skip(self, query))]
    pub async fn respond(
        &self,
        chat_id: i64,
        function: ChatFunction,
        query: &str,
        stream: bool,
    ) -> ChatReply {
        let context = {
            let mut history = self.history.lock().await;
            history.append(chat_id, function, Role::User, query);
            history.history(chat_id, function).to_vec()
        };

        if stream {
            match self.api.stream(&self.config.params, context).await {
                Ok(tokens) => ChatReply::Stream(tokens),
                Err(e) => {
                    tracing::error!(error = %e, "step: chat stream open failed");
                    ChatReply::Answer(error_answer(&e))
                }
            }
        } else {
            ChatReply::Answer(self.complete_answer(chat_id, function, context).await)
        }
    }

    /// Non-streamed convenience wrapper returning the finished answer string.
    pub async fn answer(&self, chat_id: i64, function: ChatFunction, query: &str) -> String {
        match self.respond(chat_id, function, query, false).await {
            ChatReply::Answer(text) => text,
            // respond() never yields a stream when stream=false.
            ChatReply::Stream(_) => NO_RESPONSE_ANSWER.to_string(),
        }
    }

    async fn complete_answer(
        &self,
        chat_id: i64,
        function: ChatFunction,
        context: Vec<ChatMessage>,
    ) -> String {
        match self.api.complete(&self.config.params, context).await {
            Ok(outcome) => self.assemble_answer(chat_id, function, outcome).await,
            Err(e) => {
                tracing::error!(error = %e, "step: chat completion failed");
                error_answer(&e)
            }
        }
    }

    /// Formats the outcome into the user-facing answer and commits the first
    /// choice to the history. Usage footers and choice markers stay out of the
    /// history.
    async fn assemble_answer(
        &self,
        chat_id: i64,
        function: ChatFunction,
        outcome: ChatOutcome,
    ) -> String {
        let Some(first) = outcome.choices.first() else {
            tracing::error!(chat_id, "step: chat completion returned no choices");
            return NO_RESPONSE_ANSWER.to_string();
        };

        {
            let mut history = self.history.lock().await;
            history.append(chat_id, function, Role::Assistant, &first.content);
        }

        let mut answer = if outcome.choices.len() > 1 && self.config.params.n_choices > 1 {
            let mut combined = String::new();
            for (index, choice) in outcome.choices.iter().enumerate() {
                combined.push_str(&format!("{}\u{20e3}", index + 1));
                combined.push('\n');
                combined.push_str(&choice.content);
                combined.push_str("\n\n");
            }
            combined
        } else {
            first.content.clone()
        };

        if self.config.show_usage {
            if let Some(usage) = outcome.usage {
                answer.push_str(&format!(
                    "\n\n---\n💰 Tokens used: {} ({} prompt, {} completion)",
                    usage.total, usage.prompt, usage.completion
                ));
            }
        }

        answer
    }

    /// Drops the chat's histories and reseeds them with the system prompt.
    pub async fn reset(&self, chat_id: i64) {
        self.history.lock().await.reset(chat_id);
        tracing::info!(chat_id, "step: chat history reset");
    }

    /// Snapshot of the (chat, function) history, for inspection.
    pub async fn history_snapshot(&self, chat_id: i64, function: ChatFunction) -> Vec<ChatMessage> {
        self.history.lock().await.history(chat_id, function).to_vec()
    }
}

fn error_answer(e: &OpenAIApiError) -> String {
    match e {
        OpenAIApiError::RateLimited(msg) => {
            format!("⚠️ _OpenAI Rate Limit exceeded_ ⚠️\n{msg}")
        }
        OpenAIApiError::InvalidRequest(msg) => {
            format!("⚠️ _OpenAI Invalid request_ ⚠️\n{msg}")
        }
        other => format!("⚠️ _An error has occurred_ ⚠️\n{other}"),
    }
}
