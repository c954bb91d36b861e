//! Model configurations and the fixed model catalog

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// System prompt shared by every catalog model
pub const MASTER_SYSTEM_PROMPT: &str = "You are a professional puzzle solver. You are given a puzzle and you need to solve it. The final answer will always be a SINGLE word. When you have a final answer output it surrounded by <answer> tags.";

pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Request body keys written by the providers themselves
const RESERVED_PARAMS: &[&str] = &["model", "messages", "max_tokens", "system", "temperature"];

/// Backend that serves a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
}

impl ProviderKind {
    pub fn all() -> Vec<ProviderKind> {
        vec![ProviderKind::OpenAI, ProviderKind::Anthropic]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Ok(ProviderKind::OpenAI),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validation failures when constructing a [`ModelConfig`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelConfigError {
    #[error("Model name cannot be empty")]
    BlankName,

    #[error("max_tokens must be positive")]
    ZeroMaxTokens,

    #[error("Temperature must be a finite non-negative number, got {0}")]
    InvalidTemperature(f32),

    #[error("Additional parameter '{0}' is set by the provider and cannot be overridden")]
    ReservedParam(String),
}

/// An immutable description of one queryable model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    name: String,
    provider: ProviderKind,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
    additional_params: Map<String, Value>,
}

impl ModelConfig {
    /// Create a config with default generation parameters
    pub fn new(
        name: impl Into<String>,
        provider: ProviderKind,
        system_prompt: impl Into<String>,
    ) -> Result<Self, ModelConfigError> {
        Self::with_params(
            name,
            provider,
            system_prompt,
            DEFAULT_MAX_TOKENS,
            DEFAULT_TEMPERATURE,
            Map::new(),
        )
    }

    /// Create a config with explicit generation parameters
    pub fn with_params(
        name: impl Into<String>,
        provider: ProviderKind,
        system_prompt: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
        additional_params: Map<String, Value>,
    ) -> Result<Self, ModelConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelConfigError::BlankName);
        }
        if max_tokens == 0 {
            return Err(ModelConfigError::ZeroMaxTokens);
        }
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(ModelConfigError::InvalidTemperature(temperature));
        }
        if let Some(key) = additional_params
            .keys()
            .find(|k| RESERVED_PARAMS.contains(&k.as_str()))
        {
            return Err(ModelConfigError::ReservedParam(key.clone()));
        }

        Ok(Self {
            name,
            provider,
            system_prompt: system_prompt.into(),
            max_tokens,
            temperature,
            additional_params,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Backend-specific parameters merged into the request body
    pub fn additional_params(&self) -> &Map<String, Value> {
        &self.additional_params
    }
}

/// The fixed set of models the harness knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelId {
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
    #[serde(rename = "claude-3-opus")]
    Claude3Opus,
}

impl ModelId {
    pub fn all() -> Vec<ModelId> {
        vec![
            ModelId::Gpt4oMini,
            ModelId::Gpt4Turbo,
            ModelId::Gpt4o,
            ModelId::Claude3Opus,
        ]
    }

    /// Models evaluated when nothing else is configured
    pub fn default_selection() -> Vec<ModelId> {
        vec![ModelId::Gpt4oMini, ModelId::Gpt4o, ModelId::Gpt4Turbo]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Gpt4oMini => "gpt-4o-mini",
            ModelId::Gpt4o => "gpt-4o",
            ModelId::Gpt4Turbo => "gpt-4-turbo",
            ModelId::Claude3Opus => "claude-3-opus",
        }
    }

    fn backend_name(&self) -> &'static str {
        match self {
            ModelId::Gpt4oMini => "gpt-4o-mini",
            ModelId::Gpt4o => "gpt-4o",
            ModelId::Gpt4Turbo => "gpt-4-turbo",
            ModelId::Claude3Opus => "claude-3-opus-20240229",
        }
    }

    pub fn provider(&self) -> ProviderKind {
        match self {
            ModelId::Gpt4oMini | ModelId::Gpt4o | ModelId::Gpt4Turbo => ProviderKind::OpenAI,
            ModelId::Claude3Opus => ProviderKind::Anthropic,
        }
    }

    /// The immutable configuration for this model
    pub fn config(&self) -> ModelConfig {
        ModelConfig {
            name: self.backend_name().to_string(),
            provider: self.provider(),
            system_prompt: MASTER_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            additional_params: Map::new(),
        }
    }
}

impl std::str::FromStr for ModelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gpt-4o-mini" | "gpt4o-mini" => Ok(ModelId::Gpt4oMini),
            "gpt-4o" | "gpt4o" => Ok(ModelId::Gpt4o),
            "gpt-4-turbo" | "gpt4-turbo" => Ok(ModelId::Gpt4Turbo),
            "claude-3-opus" | "claude-3-opus-20240229" | "claude3" => Ok(ModelId::Claude3Opus),
            _ => Err(format!("Unknown model: {}", s)),
        }
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
