//! Error types for the Parley client

use thiserror::Error;

/// Result type alias for Parley operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Parley client
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Speech capture error
    #[error("speech capture error: {0}")]
    Capture(String),

    /// Speech output error
    #[error("speech output error: {0}")]
    Speech(String),

    /// Q&A backend error (connectivity or non-success status)
    #[error("backend error: {0}")]
    Backend(String),

    /// Credential validation error
    #[error("credential error: {0}")]
    Credential(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
