//! Anthropic (Claude) messages client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::traits::{encode_image, retry_after_ms, LLMProvider, ProviderError, ProviderResult, IMAGE_MEDIA_TYPE};
use crate::models::{ModelConfig, ProviderKind};
use crate::puzzles::Puzzle;

pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

/// Anthropic API client
pub struct AnthropicClient {
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
    http_client: Client,
}

impl AnthropicClient {
    /// Create a client with an explicit key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: Client::new(),
        }
    }

    /// Create from the default environment variable
    pub fn from_env() -> Self {
        Self::from_env_var(DEFAULT_API_KEY_ENV)
    }

    /// Create from a named environment variable; a missing key only fails at request time
    pub fn from_env_var(var: &str) -> Self {
        let api_key = std::env::var(var).ok().filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("{} not set; Anthropic requests will fail", var);
        }
        Self {
            api_key,
            api_key_env: var.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: Client::new(),
        }
    }

    /// Set custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage>,
    temperature: f32,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentPart {
    Text { text: String },
    Image { source: ImageSource },
}

#[derive(Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: &'static str,
    data: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct AnthropicError {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// One user message: the puzzle text, then the image block if there is one
fn build_request<'a>(puzzle: &Puzzle, model: &'a ModelConfig) -> ProviderResult<AnthropicRequest<'a>> {
    let mut content = vec![ContentPart::Text {
        text: puzzle.text().to_string(),
    }];

    if let Some(path) = puzzle.image_path() {
        content.push(ContentPart::Image {
            source: ImageSource {
                source_type: "base64",
                media_type: IMAGE_MEDIA_TYPE,
                data: encode_image(path)?,
            },
        });
    }

    Ok(AnthropicRequest {
        model: model.name(),
        max_tokens: model.max_tokens(),
        system: model.system_prompt(),
        messages: vec![AnthropicMessage {
            role: "user",
            content,
        }],
        temperature: model.temperature(),
        extra: model.additional_params(),
    })
}

#[async_trait]
impl LLMProvider for AnthropicClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn generate_response(
        &self,
        puzzle: &Puzzle,
        model: &ModelConfig,
    ) -> ProviderResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::Auth(format!("{} not set", self.api_key_env)))?;

        let body = build_request(puzzle, model)?;
        tracing::debug!("POST {}/messages model={}", self.base_url, model.name());

        let response = self
            .http_client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_ms: retry_after_ms(&response),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<AnthropicError>(&body) {
                Ok(error) => error.error.message,
                Err(_) => format!("HTTP {}: {}", status.as_u16(), body),
            };

            if status == 401 || status == 403 {
                return Err(ProviderError::Auth(format!(
                    "Anthropic rejected credentials ({}): {}",
                    status.as_u16(),
                    message
                )));
            }

            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        api_response
            .content
            .into_iter()
            .find(|block| block.content_type == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| ProviderError::Parse("No text block in response".to_string()))
    }
}
