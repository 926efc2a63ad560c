//! Bridge error types

use stdio_bridge_transport::TransportError;
use thiserror::Error;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors raised while configuring the bridge or handling one request.
///
/// Per-request variants are never fatal: the dispatcher turns them into an
/// `{"error": ...}` line and keeps reading.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BridgeError {
    /// Input line is not a valid request, or output could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request path cannot be joined onto the base URL
    #[error("Invalid path {path:?}: {reason}")]
    InvalidPath {
        /// The path as received
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configured base URL is unusable
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The configured value
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Upstream call failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// IO error on stdin/stdout
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
