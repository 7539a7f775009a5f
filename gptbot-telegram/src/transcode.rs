//! Audio transcoding boundary. Telegram voice notes arrive as ogg/opus, which
//! the transcription endpoint does not accept; they go through ffmpeg first.

use async_trait::async_trait;
use gptbot_core::{GptbotError, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::instrument;

/// Converts an audio file to mp3. Tests substitute a fake; production uses
/// [`FfmpegTranscoder`].
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn to_mp3(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Shells out to the `ffmpeg` binary on PATH.
pub struct FfmpegTranscoder;

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    #[instrument(skip(self))]
    async fn to_mp3(&self, input: &Path, output: &Path) -> Result<()> {
        let status = Command::new("ffmpeg")
            .arg("-y")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(input)
            .arg(output)
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            Err(GptbotError::Unknown(format!(
                "ffmpeg exited with status: {}",
                status
            )))
        }
    }
}
