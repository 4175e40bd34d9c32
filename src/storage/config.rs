//! Application configuration persisted as TOML

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::json_file::DEFAULT_TASKS_FILE;
use super::todo_dir;
use crate::error::{Result, TodoError};

/// Default port for the API server
pub const DEFAULT_PORT: u16 = 3000;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub quote: QuoteConfig,
}

impl Config {
    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(TodoError::config("server.host must not be empty"));
        }
        if self.storage.path.as_os_str().is_empty() {
            return Err(TodoError::config("storage.path must not be empty"));
        }
        if self.quote.enabled && self.quote.timeout_secs == 0 {
            return Err(TodoError::config("quote.timeout_secs must be at least 1"));
        }
        Ok(())
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Task store location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_tasks_path")]
    pub path: PathBuf,
}

fn default_tasks_path() -> PathBuf {
    PathBuf::from(DEFAULT_TASKS_FILE)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_tasks_path(),
        }
    }
}

/// Motivational quote fetched after a task is completed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteConfig {
    #[serde(default = "default_quote_enabled")]
    pub enabled: bool,
    #[serde(default = "default_quote_url")]
    pub url: String,
    #[serde(default = "default_quote_timeout")]
    pub timeout_secs: u64,
}

fn default_quote_enabled() -> bool {
    true
}

fn default_quote_url() -> String {
    "https://api.quotable.io/random".to_string()
}

fn default_quote_timeout() -> u64 {
    3
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            enabled: default_quote_enabled(),
            url: default_quote_url(),
            timeout_secs: default_quote_timeout(),
        }
    }
}

/// Default config file path: ~/.todo/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    todo_dir().map(|dir| dir.join("config.toml"))
}

/// Parse a config file
pub fn parse_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load config (defaults when the file is missing or malformed)
pub fn load_config(path: Option<&Path>) -> Config {
    let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => p,
        None => return Config::default(),
    };
    if !path.exists() {
        return Config::default();
    }
    match parse_config(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.path, PathBuf::from("tasks.json"));
        assert!(config.quote.enabled);
        assert_eq!(config.quote.timeout_secs, 3);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = 8080\n\n[quote]\nenabled = false\n").unwrap();

        let config = load_config(Some(path.as_path()));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.quote.enabled);
        assert_eq!(config.quote.url, default_quote_url());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nport = ").unwrap();

        assert!(parse_config(&path).is_err());
        assert_eq!(load_config(Some(path.as_path())), Config::default());
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.quote.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(TodoError::Config(_))));

        config.quote.enabled = false;
        assert!(config.validate().is_ok());

        config.storage.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = load_config(Some(path.as_path()));
        assert_eq!(config, Config::default());
    }
}
