//! Unified error type for todo-rs
//!
//! Built on `thiserror` so storage, config and validation failures all
//! travel through one enum and convert with `?`.

use std::io;
use thiserror::Error;

/// todo-rs error type
#[derive(Debug, Error)]
pub enum TodoError {
    /// I/O error (file reads/writes, directory creation)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON parse / serialize error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The task store could not be written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Referenced task does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// todo-rs Result alias
pub type Result<T> = std::result::Result<T, TodoError>;

impl TodoError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::InvalidInput(_) => "InvalidInput",
            Self::Io(_) | Self::Storage(_) | Self::JsonParse(_) => "StoreUnavailable",
            Self::Config(_) | Self::TomlParse(_) => "Config",
        }
    }
}
