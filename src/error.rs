/// Error types for the link client
use thiserror::Error;

/// Failure of a call against the remote link API
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error {0}")]
    Status(u16),
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Failure reading or writing synced extension storage
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    #[error("storage bridge failed: {0}")]
    Bridge(String),
    #[error("storage value malformed: {0}")]
    Serde(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("unsupported url scheme {0:?}")]
    UnsupportedScheme(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serde(e.to_string())
    }
}
