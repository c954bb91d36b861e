//! OpenAI chat-completions client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::traits::{encode_image, retry_after_ms, LLMProvider, ProviderError, ProviderResult, IMAGE_MEDIA_TYPE};
use crate::models::{ModelConfig, ProviderKind};
use crate::puzzles::Puzzle;

pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI API client
pub struct OpenAIClient {
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
    http_client: Client,
}

impl OpenAIClient {
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

    /// Create from a named environment variable.
    ///
    /// A missing key is not an error here; requests fail with
    /// [`ProviderError::Auth`] instead.
    pub fn from_env_var(var: &str) -> Self {
        let api_key = std::env::var(var).ok().filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("{} not set; OpenAI requests will fail", var);
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
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct OpenAIMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIError {
    error: OpenAIErrorDetail,
}

#[derive(Deserialize)]
struct OpenAIErrorDetail {
    message: String,
}

/// System message first, then the puzzle as a plain or multimodal user message
fn build_request<'a>(puzzle: &Puzzle, model: &'a ModelConfig) -> ProviderResult<OpenAIRequest<'a>> {
    let user_content = match puzzle.image_path() {
        Some(path) => MessageContent::Parts(vec![
            ContentPart::Text {
                text: puzzle.text().to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{};base64,{}", IMAGE_MEDIA_TYPE, encode_image(path)?),
                },
            },
        ]),
        None => MessageContent::Text(puzzle.text().to_string()),
    };

    Ok(OpenAIRequest {
        model: model.name(),
        messages: vec![
            OpenAIMessage {
                role: "system",
                content: MessageContent::Text(model.system_prompt().to_string()),
            },
            OpenAIMessage {
                role: "user",
                content: user_content,
            },
        ],
        max_tokens: model.max_tokens(),
        temperature: model.temperature(),
        extra: model.additional_params(),
    })
}

#[async_trait]
impl LLMProvider for OpenAIClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
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
        tracing::debug!("POST {}/chat/completions model={}", self.base_url, model.name());

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
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
            let message = match serde_json::from_str::<OpenAIError>(&body) {
                Ok(error) => error.error.message,
                Err(_) => format!("HTTP {}: {}", status.as_u16(), body),
            };

            if status == 401 || status == 403 {
                return Err(ProviderError::Auth(format!(
                    "OpenAI rejected credentials ({}): {}",
                    status.as_u16(),
                    message
                )));
            }

            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Parse("No choices in response".to_string()))?
            .message
            .content
            .ok_or_else(|| ProviderError::Parse("Completion has no text content".to_string()))
    }
}
