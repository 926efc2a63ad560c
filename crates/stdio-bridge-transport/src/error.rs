//! Transport error types

use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur in transport operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransportError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout error
    #[error("Timeout")]
    Timeout,

    /// Method string is not a valid HTTP method token
    #[error("Unsupported HTTP method: {0}")]
    InvalidMethod(String),

    /// Request shape rejected before it reached the network
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Process error (for the subprocess forwarder)
    #[error("Process error: {0}")]
    Process(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
