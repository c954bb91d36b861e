//! LLM provider implementations and the provider registry

pub mod anthropic;
pub mod openai;
pub mod traits;

pub use anthropic::AnthropicClient;
pub use openai::OpenAIClient;
pub use traits::{encode_image, LLMProvider, ProviderError, ProviderResult, IMAGE_MEDIA_TYPE};

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::models::ProviderKind;

/// Provider instances keyed by the tag models declare.
///
/// Built once per run and shared read-only by the solver.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn LLMProvider>>,
}

impl ProviderRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register both backends, reading credentials and endpoints from config
    pub fn from_config(config: &Config) -> Self {
        let openai = config.provider(ProviderKind::OpenAI);
        let anthropic = config.provider(ProviderKind::Anthropic);

        Self::new()
            .with_provider(Arc::new(
                OpenAIClient::from_env_var(&openai.api_key_env).with_base_url(&openai.base_url),
            ))
            .with_provider(Arc::new(
                AnthropicClient::from_env_var(&anthropic.api_key_env)
                    .with_base_url(&anthropic.base_url),
            ))
    }

    /// Register a provider under its own tag, replacing any previous one
    pub fn with_provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.providers.insert(provider.kind(), provider);
        self
    }

    /// Look up the provider serving `kind`
    pub fn get(&self, kind: ProviderKind) -> Option<&Arc<dyn LLMProvider>> {
        self.providers.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
