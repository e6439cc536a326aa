use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::types::Config;

/// Longest simulated fetch latency accepted from the config file.
pub const MAX_DELAY_MS: u64 = 10 * 60 * 1000;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/fluxstore/config.toml` on Unix,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("fluxstore").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise behaves like [`Config::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// A missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The log level is a valid filter directive
    /// - The fetch delay is at most [`MAX_DELAY_MS`]
    /// - User names and todo items are not blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid log level '{}': {}", self.logging.level, e),
            });
        }

        if self.users.delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "users.delay_ms must be at most {}, got {}",
                    MAX_DELAY_MS, self.users.delay_ms
                ),
            });
        }

        if self.users.names.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: "users.names must not contain blank names".to_string(),
            });
        }

        if self.todos.initial.iter().any(|todo| todo.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: "todos.initial must not contain blank items".to_string(),
            });
        }

        Ok(())
    }

    pub fn users_delay(&self) -> Duration {
        Duration::from_millis(self.users.delay_ms)
    }
}
