//! Provider trait definitions for LLM API clients

use async_trait::async_trait;
use base64::Engine;
use std::path::Path;

use crate::models::{ModelConfig, ProviderKind};
use crate::puzzles::Puzzle;

/// Media type attached to every inline image, whatever the file's real format
pub const IMAGE_MEDIA_TYPE: &str = "image/jpeg";

/// Error types for provider operations
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Rate limited: retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Failed to read image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// A backend able to answer a puzzle for a given model configuration
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Which provider tag this backend serves
    fn kind(&self) -> ProviderKind;

    /// Send one request for `puzzle` and return the primary text completion
    async fn generate_response(
        &self,
        puzzle: &Puzzle,
        model: &ModelConfig,
    ) -> ProviderResult<String>;
}

/// Read an image file and return its contents as standard base64
pub fn encode_image(path: &Path) -> ProviderResult<String> {
    let bytes = std::fs::read(path).map_err(|source| ProviderError::Image {
        path: path.display().to_string(),
        source,
    })?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Extract the `retry-after` header (seconds) as milliseconds, defaulting to 60s
pub(crate) fn retry_after_ms(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60)
        .saturating_mul(1000)
}
