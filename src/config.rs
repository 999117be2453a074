use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::catalog::PartyCatalog;
use crate::error::PredictError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// "openai" or "openai-compatible"
    pub provider: String,
    pub model: String,
    pub api_key_env: Option<String>,
    pub base_url: Option<String>, // For OpenAI-compatible gateways

    /// Optional completion length cap; omitted from the request when unset
    pub max_tokens: Option<u32>,

    /// Optional request timeout. No timeout is applied when unset.
    pub timeout_secs: Option<u64>,
}

impl LlmConfig {
    /// Base URL for the chat completions endpoint
    pub fn get_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_OPENAI_BASE_URL)
    }

    /// Read the bearer credential from the configured environment variable.
    /// An unset or empty variable counts as missing.
    pub fn get_api_key(&self) -> Result<String, PredictError> {
        let env_var = self
            .api_key_env
            .as_deref()
            .ok_or_else(|| PredictError::MissingCredential("<not configured>".to_string()))?;

        match env::var(env_var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(PredictError::MissingCredential(env_var.to_string())),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            base_url: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML catalog file; the built-in table is used when unset
    #[serde(default)]
    pub path: Option<String>,
}

impl CatalogConfig {
    pub fn load_catalog(&self) -> Result<PartyCatalog> {
        match &self.path {
            Some(path) => PartyCatalog::from_path(path),
            None => {
                debug!("Using built-in party catalog");
                Ok(PartyCatalog::builtin())
            }
        }
    }
}

impl Config {
    /// Load config from the working directory or user config directory
    pub fn load() -> Result<Self> {
        Self::load_with_path(None)
    }

    /// Load configuration from a specific path, or use default search paths
    pub fn load_with_path(path: Option<String>) -> Result<Self> {
        // An explicit path must exist and parse
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path);
            return Self::load_from_path(&config_path)
                .with_context(|| format!("failed to load config {}", config_path));
        }

        if let Some(config) = Self::load_if_present(Path::new("party-predict.toml")) {
            return Ok(config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("party-predict").join("config.toml");
            if let Some(config) = Self::load_if_present(&config_path) {
                return Ok(config);
            }
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    /// A search-path candidate. Missing files are skipped quietly; files
    /// that exist but fail to load are skipped with a warning.
    fn load_if_present(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_path(path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring config {}: {:#}", path.display(), e);
                None
            }
        }
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
