//! Streamed-reply loop: accumulates token fragments and mirrors the running
//! text into one Telegram message, created on the first flush and edited
//! thereafter.
//!
//! Not every fragment is worth an API call; a probabilistic gate decides per
//! fragment whether to flush, which thins the edit rate without bookkeeping
//! timers. Transport failures never abort the loop: the text survives in the
//! accumulator and the next flush (or the final one) carries it.

use std::sync::Arc;

use futures::StreamExt;
use gptbot_core::{Bot, Chat};
use openai_client::TokenStream;
use tracing::{error, warn};

/// Default gate threshold; a uniform sample must exceed it, so roughly 80%
/// of fragments flush.
pub const DEFAULT_FLUSH_THRESHOLD: f64 = 0.2;

/// Per-fragment decision whether to push the accumulated text to Telegram.
/// Tests substitute deterministic gates.
pub trait FlushGate: Send + Sync {
    fn should_flush(&self) -> bool;
}

/// Production gate: flushes when a uniform sample in [0, 1) exceeds the
/// threshold.
pub struct RandomFlushGate {
    threshold: f64,
}

impl RandomFlushGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for RandomFlushGate {
    fn default() -> Self {
        Self::new(DEFAULT_FLUSH_THRESHOLD)
    }
}

impl FlushGate for RandomFlushGate {
    fn should_flush(&self) -> bool {
        rand::random::<f64>() > self.threshold
    }
}

/// Per-reply state. Owned by the handling task, never shared.
struct StreamReplyState {
    text: String,
    message_id: Option<String>,
    dirty: bool,
}

impl StreamReplyState {
    fn new() -> Self {
        Self {
            text: String::new(),
            message_id: None,
            dirty: false,
        }
    }

    /// Pushes the accumulated text to Telegram: first flush creates the
    /// message, later ones edit it in place. A failed attempt leaves `dirty`
    /// set so the text is retried on the next flush.
    async fn flush(&mut self, bot: &Arc<dyn Bot>, chat: &Chat) {
        match &self.message_id {
            None => match bot.send_message_and_return_id(chat, &self.text).await {
                Ok(id) => {
                    self.message_id = Some(id);
                    self.dirty = false;
                }
                Err(e) => warn!(error = %e, "step: stream reply send failed"),
            },
            Some(id) => match bot.edit_message(chat, id, &self.text).await {
                Ok(()) => self.dirty = false,
                Err(e) => warn!(error = %e, "step: stream reply edit failed"),
            },
        }
    }
}

/// Drives a token stream into a single Telegram message and returns the full
/// accumulated text.
///
/// Empty fragments are skipped. Stream errors are logged and skipped; whatever
/// arrived before them still reaches the user. When the stream ends with
/// unsent text, a final flush delivers it, creating the message if the gate
/// never passed. No output means no message at all.
pub async fn run_stream_reply(
    bot: Arc<dyn Bot>,
    chat: &Chat,
    mut tokens: TokenStream,
    gate: &dyn FlushGate,
) -> String {
    let mut state = StreamReplyState::new();

    while let Some(item) = tokens.next().await {
        let fragment = match item {
            Ok(fragment) => fragment,
            Err(e) => {
                error!(error = %e, "step: stream fragment failed");
                continue;
            }
        };
        if fragment.is_empty() {
            continue;
        }
        state.text.push_str(&fragment);
        state.dirty = true;

        if gate.should_flush() {
            state.flush(&bot, chat).await;
        }
    }

    if state.dirty && !state.text.is_empty() {
        state.flush(&bot, chat).await;
    }

    state.text
}
