//! Audio transcription via the Whisper endpoint.

use async_openai::types::CreateTranscriptionRequestArgs;
use tracing::instrument;

use crate::error::{classify, OpenAIApiError};
use crate::OpenAIClient;

/// Model used for audio transcription.
pub const TRANSCRIPTION_MODEL: &str = "whisper-1";

impl OpenAIClient {
    /// Transcribes the audio file at `path` and returns the recognized text.
    #[instrument(skip(self))]
    pub async fn transcribe(&self, path: &str) -> Result<String, OpenAIApiError> {
        let request = CreateTranscriptionRequestArgs::default()
            .file(path)
            .model(TRANSCRIPTION_MODEL)
            .build()
            .map_err(classify)?;

        let response = self
            .inner()
            .audio()
            .transcribe(request)
            .await
            .map_err(classify)?;

        Ok(response.text)
    }
}
