//! Configuration management for Chefmate
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ChefmateError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Chefmate
///
/// Holds the completion-provider settings, the recipe dataset location,
/// and chat behavior knobs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Completion provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Recipe dataset configuration
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Chat session configuration
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Completion provider configuration
///
/// Currently the only supported provider type is `gemini`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Google Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            gemini: GeminiConfig::default(),
        }
    }
}

/// Google Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use for completions
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API key; when unset, the `GEMINI_API_KEY` environment
    /// variable is consulted at provider creation time
    #[serde(default)]
    pub api_key: Option<String>,

    /// Optional API base URL (useful for tests and local mocks)
    ///
    /// When set, this base is used to build the `generateContent` and
    /// `streamGenerateContent` endpoints, which allows tests to point
    /// the provider at a mock server.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_key: None,
            api_base: None,
            timeout_seconds: default_timeout(),
        }
    }
}

/// Recipe dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the recipe CSV file
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

fn default_dataset_path() -> String {
    "data/recipes.csv".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

/// Chat session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Greeting shown as the first assistant turn of a session
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_greeting() -> String {
    "Hello! I am your personal AI chef. How can I help you with your cooking today?".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChefmateError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ChefmateError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_key) = std::env::var("CHEFMATE_GEMINI_API_KEY") {
            self.provider.gemini.api_key = Some(api_key);
        }

        if let Ok(model) = std::env::var("CHEFMATE_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("CHEFMATE_API_BASE") {
            self.provider.gemini.api_base = Some(api_base);
        }

        if let Ok(path) = std::env::var("CHEFMATE_DATASET") {
            self.dataset.path = path;
        }

        if let Ok(timeout) = std::env::var("CHEFMATE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.gemini.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid CHEFMATE_TIMEOUT_SECONDS: {}", timeout);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(model) = &cli.model {
            self.provider.gemini.model = model.clone();
        }

        if let Some(dataset) = &cli.dataset {
            self.dataset.path = dataset.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any setting is out of range or inconsistent
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type != "gemini" {
            return Err(ChefmateError::Config(format!(
                "Unknown provider type: {}",
                self.provider.provider_type
            ))
            .into());
        }

        if self.provider.gemini.model.trim().is_empty() {
            return Err(ChefmateError::Config("Model name cannot be empty".to_string()).into());
        }

        if self.provider.gemini.timeout_seconds == 0 {
            return Err(
                ChefmateError::Config("timeout_seconds must be at least 1".to_string()).into(),
            );
        }

        if self.chat.greeting.trim().is_empty() {
            return Err(ChefmateError::Config("Greeting cannot be empty".to_string()).into());
        }

        Ok(())
    }
}
