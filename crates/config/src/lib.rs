//! Configuration loading and validation for Petal.
//!
//! Loads runtime configuration from `~/.petal/config.toml` with environment
//! variable overrides, and petal definitions from YAML files in the
//! configured petals directory.

pub mod petals;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use petals::{PetalDefinition, registry_from_definitions};

/// The root configuration structure.
///
/// Maps directly to `~/.petal/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding `*.yml` petal definitions
    #[serde(default = "default_petals_dir")]
    pub petals_dir: PathBuf,

    /// Model name handed to the token source
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Capacity of the token channel between the model and the assembler
    #[serde(default = "default_stream_buffer")]
    pub stream_buffer: usize,

    /// Hide collected objective values in CLI output
    #[serde(default)]
    pub redact_values: bool,
}

fn default_petals_dir() -> PathBuf {
    AppConfig::config_dir().join("petals")
}
fn default_model() -> String {
    "gpt-3.5-turbo".into()
}
fn default_stream_buffer() -> usize {
    64
}

impl AppConfig {
    /// Load configuration from the default path (~/.petal/config.toml).
    ///
    /// Environment overrides:
    /// - `PETAL_PETALS_DIR`
    /// - `PETAL_MODEL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(dir) = std::env::var("PETAL_PETALS_DIR") {
            config.petals_dir = PathBuf::from(dir);
        }

        if let Ok(model) = std::env::var("PETAL_MODEL") {
            config.default_model = model;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".petal")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.stream_buffer == 0 {
            return Err(ConfigError::ValidationError(
                "stream_buffer must be at least 1".into(),
            ));
        }

        if self.default_model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "default_model must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Load every petal definition from `petals_dir`.
    pub fn load_petals(&self) -> Result<Vec<PetalDefinition>, ConfigError> {
        petals::load_dir(&self.petals_dir)
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            petals_dir: default_petals_dir(),
            default_model: default_model(),
            stream_buffer: default_stream_buffer(),
            redact_values: false,
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
