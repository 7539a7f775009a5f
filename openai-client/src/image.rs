//! Image generation: text prompt in, image URL out.

use async_openai::types::{CreateImageRequestArgs, Image, ImageResponseFormat, ImageSize};
use tracing::instrument;

use crate::error::{classify, OpenAIApiError};
use crate::OpenAIClient;

/// Parses a "WIDTHxHEIGHT" string into an [`ImageSize`]. Unknown values fall
/// back to 512x512.
pub fn parse_image_size(s: &str) -> ImageSize {
    match s.trim() {
        "256x256" => ImageSize::S256x256,
        "1024x1024" => ImageSize::S1024x1024,
        "1792x1024" => ImageSize::S1792x1024,
        "1024x1792" => ImageSize::S1024x1792,
        _ => ImageSize::S512x512,
    }
}

impl OpenAIClient {
    /// Generates one image for the prompt and returns its URL.
    #[instrument(skip(self, prompt))]
    pub async fn generate_image(&self, prompt: &str) -> Result<String, OpenAIApiError> {
        tracing::info!(
            size = ?self.image_size(),
            prompt_preview = %prompt.chars().take(100).collect::<String>(),
            "OpenAI image generation request"
        );

        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .size(self.image_size())
            .response_format(ImageResponseFormat::Url)
            .n(1)
            .build()
            .map_err(classify)?;

        let response = self
            .inner()
            .images()
            .create(request)
            .await
            .map_err(classify)?;

        match response.data.first().and_then(|d| match d.as_ref() {
            Image::Url { url, .. } => Some(url),
            Image::B64Json { .. } => None,
        }) {
            Some(url) => {
                tracing::info!(image_url = %url, "OpenAI image generation completed");
                Ok(url.clone())
            }
            None => Err(OpenAIApiError::NoImageUrl),
        }
    }
}
