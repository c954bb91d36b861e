//! Configuration management for the puzzle benchmark
//!
//! Loads provider endpoints, credential variable names and the run selection
//! from a TOML file, falling back to built-in defaults.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{ModelConfig, ModelId, ProviderKind};
use crate::providers::{anthropic, openai};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Keyed by provider tag (`openai`, `anthropic`)
    #[serde(default)]
    pub providers: HashMap<String, ProviderSettings>,
    #[serde(default)]
    pub run: RunConfig,
}

/// Provider endpoint and credential source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub base_url: String,
}

impl ProviderSettings {
    fn default_for(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::OpenAI => Self {
                api_key_env: openai::DEFAULT_API_KEY_ENV.to_string(),
                base_url: openai::DEFAULT_BASE_URL.to_string(),
            },
            ProviderKind::Anthropic => Self {
                api_key_env: anthropic::DEFAULT_API_KEY_ENV.to_string(),
                base_url: anthropic::DEFAULT_BASE_URL.to_string(),
            },
        }
    }
}

/// What to evaluate and where to write it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_models")]
    pub models: Vec<ModelId>,
    /// JSON puzzle catalog; the built-in catalog is used when unset.
    /// Relative paths are resolved against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puzzles: Option<PathBuf>,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

fn default_models() -> Vec<ModelId> { ModelId::default_selection() }
fn default_results_dir() -> PathBuf { PathBuf::from("results") }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            puzzles: None,
            results_dir: default_results_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;

        if let Some(base_dir) = path.parent() {
            config.run.puzzles = config
                .run
                .puzzles
                .take()
                .map(|p| if p.is_relative() { base_dir.join(p) } else { p });
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut seen = HashSet::new();
        if let Some(model) = config.run.models.iter().find(|m| !seen.insert(**m)) {
            return Err(ConfigError::DuplicateModel(*model));
        }
        Ok(config)
    }

    /// Load from default config location or return defaults
    pub fn load_or_default() -> Self {
        let config_paths = [
            "config/puzzle-bench.toml",
            "../config/puzzle-bench.toml",
            "puzzle-bench/config/puzzle-bench.toml",
        ];

        for path in &config_paths {
            if let Ok(config) = Self::from_file(path) {
                tracing::info!("Loaded configuration from {}", path);
                return config;
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    /// Save configuration to a TOML file
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Settings for a provider, with defaults filled in for unlisted ones
    pub fn provider(&self, kind: ProviderKind) -> ProviderSettings {
        self.providers
            .get(kind.as_str())
            .cloned()
            .unwrap_or_else(|| ProviderSettings::default_for(kind))
    }

    /// Resolve the selected model ids into their configurations, in order
    pub fn selected_models(&self) -> Vec<ModelConfig> {
        self.run.models.iter().map(ModelId::config).collect()
    }
}

/// Load API keys from a `.env` file into the process environment.
///
/// With no explicit path, `.env` is searched for in the working directory
/// and its parents. Variables already set are left untouched. Returns the
/// file that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(file) => {
            tracing::info!("Loaded environment from {}", file.display());
            Some(file)
        }
        Err(e) => {
            if path.is_some() {
                tracing::warn!("Could not load env file: {}", e);
            }
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let providers = ProviderKind::all()
            .into_iter()
            .map(|kind| (kind.as_str().to_string(), ProviderSettings::default_for(kind)))
            .collect();

        Self {
            providers,
            run: RunConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Model {0} is listed more than once")]
    DuplicateModel(ModelId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider(ProviderKind::OpenAI).api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.provider(ProviderKind::Anthropic).api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.run.models, ModelId::default_selection());
        assert_eq!(config.run.results_dir, PathBuf::from("results"));
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[providers.openai]
api_key_env = "MY_OPENAI_KEY"
base_url = "http://localhost:8080/v1"

[run]
models = ["gpt-4o", "claude-3-opus"]
puzzles = "catalogs/riddles.json"
"#;
        let config = Config::from_toml(toml).unwrap();
        let openai = config.provider(ProviderKind::OpenAI);
        assert_eq!(openai.api_key_env, "MY_OPENAI_KEY");
        assert_eq!(openai.base_url, "http://localhost:8080/v1");

        // Unlisted provider falls back to defaults
        assert_eq!(
            config.provider(ProviderKind::Anthropic),
            ProviderSettings::default_for(ProviderKind::Anthropic)
        );

        assert_eq!(config.run.models, vec![ModelId::Gpt4o, ModelId::Claude3Opus]);
        assert_eq!(config.run.puzzles, Some(PathBuf::from("catalogs/riddles.json")));
        assert_eq!(config.run.results_dir, PathBuf::from("results"));

        let names: Vec<String> = config
            .selected_models()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["gpt-4o", "claude-3-opus-20240229"]);
    }

    #[test]
    fn test_unknown_model_rejected() {
        let err = Config::from_toml("[run]\nmodels = [\"llama-3\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_duplicate_model_rejected() {
        let err = Config::from_toml("[run]\nmodels = [\"gpt-4o\", \"gpt-4o-mini\", \"gpt-4o\"]\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateModel(ModelId::Gpt4o)));
    }

    #[test]
    fn test_catalog_path_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("other/dir");
        std::fs::create_dir_all(&nested).unwrap();
        let path = nested.join("x.toml");
        std::fs::write(&path, "[run]\npuzzles = \"data/riddles.json\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.run.puzzles, Some(nested.join("data/riddles.json")));

        // Absolute paths are left alone
        let absolute = dir.path().join("abs.json");
        std::fs::write(&path, format!("[run]\npuzzles = {:?}\n", absolute.display().to_string())).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.run.puzzles, Some(absolute));
    }

    #[test]
    fn test_load_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "PUZZLE_BENCH_CONFIG_TEST_KEY=sk-from-file\n").unwrap();

        assert_eq!(load_env_file(Some(path.as_path())), Some(path.clone()));
        assert_eq!(
            std::env::var("PUZZLE_BENCH_CONFIG_TEST_KEY").as_deref(),
            Ok("sk-from-file")
        );

        assert_eq!(load_env_file(Some(dir.path().join("missing.env").as_path())), None);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("puzzle-bench.toml");
        Config::default().save_toml(&path).unwrap();

        let reloaded = Config::from_file(&path).unwrap();
        assert_eq!(reloaded.run.models, ModelId::default_selection());
        assert_eq!(
            reloaded.provider(ProviderKind::OpenAI),
            ProviderSettings::default_for(ProviderKind::OpenAI)
        );
    }
}
