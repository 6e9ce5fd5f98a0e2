//! Error types for prompt definitions.

use thiserror::Error;

/// Failure to parse a prompt definition.
///
/// Problems inside a well-formed definition (missing labels, empty option
/// lists, duplicate names) are tolerated and never reported here.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML syntax or shape error
    #[error("Invalid TOML prompt definition: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax or shape error
    #[error("Invalid JSON prompt definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for prompt definition parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;
