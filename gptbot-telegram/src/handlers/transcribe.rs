//! Voice/audio transcription handler.
//!
//! Voice notes are downloaded as ogg and transcoded to mp3; audio files are
//! downloaded as mp3 directly. Both temp files are removed on every exit
//! path, success or failure.

use async_trait::async_trait;
use gptbot_core::{
    Attachment, AttachmentKind, Bot, GptbotError, Handler, HandlerResponse, Message, Result,
};
use openai_client::{OpenAIApiError, OpenAIClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::transcode::Transcoder;

/// Reply sent when any step of the pipeline fails.
pub const TRANSCRIBE_FAILED_MESSAGE: &str = "Failed to transcribe text";

/// Speech-to-text boundary, substitutable in tests.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, path: &str) -> std::result::Result<String, OpenAIApiError>;
}

#[async_trait]
impl Transcriber for OpenAIClient {
    async fn transcribe(&self, path: &str) -> std::result::Result<String, OpenAIApiError> {
        OpenAIClient::transcribe(self, path).await
    }
}

pub struct TranscribeHandler {
    bot: Arc<dyn Bot>,
    transcriber: Arc<dyn Transcriber>,
    transcoder: Arc<dyn Transcoder>,
    work_dir: PathBuf,
}

impl TranscribeHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        transcriber: Arc<dyn Transcriber>,
        transcoder: Arc<dyn Transcoder>,
        work_dir: PathBuf,
    ) -> Self {
        Self {
            bot,
            transcriber,
            transcoder,
            work_dir,
        }
    }

    async fn transcribe_attachment(
        &self,
        attachment: &Attachment,
        ogg: &Path,
        mp3: &Path,
    ) -> Result<String> {
        match attachment.kind {
            AttachmentKind::Voice => {
                self.bot.download_file(&attachment.file_id, ogg).await?;
                self.transcoder.to_mp3(ogg, mp3).await?;
            }
            AttachmentKind::Audio => {
                self.bot.download_file(&attachment.file_id, mp3).await?;
            }
        }

        self.transcriber
            .transcribe(&mp3.to_string_lossy())
            .await
            .map_err(|e| GptbotError::Unknown(e.to_string()))
    }
}

#[async_trait]
impl Handler for TranscribeHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(attachment) = &message.attachment else {
            return Ok(HandlerResponse::Continue);
        };

        info!(
            chat_id = message.chat.id,
            kind = ?attachment.kind,
            "step: transcribe request received"
        );

        let ogg = self.work_dir.join(format!("{}.ogg", attachment.unique_id));
        let mp3 = self.work_dir.join(format!("{}.mp3", attachment.unique_id));

        let outcome = self.transcribe_attachment(attachment, &ogg, &mp3).await;

        // Temp files go away before the reply, whatever happened.
        let _ = tokio::fs::remove_file(&ogg).await;
        let _ = tokio::fs::remove_file(&mp3).await;

        match outcome {
            Ok(transcript) => {
                self.bot.reply_to(message, &transcript).await?;
                Ok(HandlerResponse::Reply(transcript))
            }
            Err(e) => {
                warn!(error = %e, "Transcription failed");
                self.bot.reply_to(message, TRANSCRIBE_FAILED_MESSAGE).await?;
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
