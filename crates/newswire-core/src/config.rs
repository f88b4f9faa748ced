//! Configuration module for Newswire.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, saving, validation, and sensible defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration for Newswire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Remote catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the catalog API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Local persistence locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file for the content catalog.
    pub database_path: PathBuf,
    /// JSON file holding user preferences and sync cursors.
    pub preferences_path: PathBuf,
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Seconds between periodic sync cycles.
    pub poll_interval_secs: u64,
    /// News resources fetched per entity-fetch request during sync.
    pub batch_size: usize,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.newswire.example.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("newswire");
        Self {
            database_path: data_dir.join("catalog.db"),
            preferences_path: data_dir.join("preferences.json"),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 900,
            // Heuristic from the backend: balances request count against
            // serialization cost per news resource batch.
            batch_size: 40,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default location of the config file (`~/.config/newswire/config.yaml`)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("newswire")
            .join("config.yaml")
    }

    /// Loads configuration from the given file, falling back to defaults if
    /// the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration to the given file, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_yaml::to_string(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        std::fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".into()));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.timeout_secs must be > 0".into()));
        }
        if self.sync.batch_size == 0 {
            return Err(ConfigError::Invalid("sync.batch_size must be > 0".into()));
        }
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "logging.level must be one of trace/debug/info/warn/error, got '{other}'"
            ))),
        }
    }
}
