//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/teastash/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/teastash/` (~/.config/teastash/)
//! - State/Logs: `$XDG_STATE_HOME/teastash/` (~/.local/state/teastash/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Remote GraphQL store configuration
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote GraphQL store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    /// GraphQL endpoint URL
    /// (e.g., `https://xyz.appsync-api.us-east-1.amazonaws.com/graphql`)
    pub endpoint: Option<String>,

    /// API key sent as the `x-api-key` header (format: "da2-xxxx")
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: default_remote_timeout(),
        }
    }
}

impl RemoteConfig {
    /// Validate configuration, returning an error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_none() {
            return Err(Error::Config("remote.endpoint is required".to_string()));
        }
        if self.api_key.is_none() {
            return Err(Error::Config("remote.api_key is required".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "remote.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_remote_timeout() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level filter (overridable via RUST_LOG)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/teastash/config.toml` (~/.config/teastash/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("teastash").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/teastash/` (~/.local/state/teastash/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("teastash")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/teastash/teastash.log` (~/.local/state/teastash/teastash.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("teastash.log")
    }
}
