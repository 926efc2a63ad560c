//! Wire types for the HTTP bridge
//!
//! One JSON object per line in each direction.
//!
//! Request:
//! ```json
//! {"path": "/api/v1/models", "method": "GET"}
//! ```
//!
//! Response:
//! ```json
//! {"status": 200, "body": "{\"data\":[...]}"}
//! ```
//!
//! Error:
//! ```json
//! {"error": "JSON error: expected value at line 1 column 1"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BridgeError;

/// Method used when a request omits `method` (or sends an empty string)
pub const DEFAULT_METHOD: &str = "POST";

/// One request read from stdin
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BridgeRequest {
    /// Appended to the configured base URL
    pub path: String,

    /// HTTP method, `POST` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Request body; absent and falsy values (`null`, `false`, `0`, `""`)
    /// all mean "send no body"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl BridgeRequest {
    /// Create a request for `path` with default method and no body
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: None,
            body: None,
        }
    }

    /// Set the method
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the JSON body
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Parse one input chunk, ignoring surrounding whitespace
    pub fn parse(chunk: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(chunk.trim())?)
    }

    /// Method to send: the given one, or [`DEFAULT_METHOD`] if absent or empty
    pub fn effective_method(&self) -> &str {
        match self.method.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => DEFAULT_METHOD,
        }
    }

    /// Compact JSON encoding of the body, if one should be sent
    pub fn encoded_body(&self) -> Result<Option<Vec<u8>>, BridgeError> {
        self.body
            .as_ref()
            .filter(|body| !is_falsy(body))
            .map(serde_json::to_vec)
            .transpose()
            .map_err(BridgeError::from)
    }
}

/// Bodies that are sent as "no body": `null`, `false`, numeric zero and the
/// empty string. Objects and arrays always count, even when empty.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Successful upstream exchange
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BridgeResponse {
    /// Upstream HTTP status code
    pub status: u16,

    /// Raw upstream body, never re-parsed
    pub body: String,
}

/// Failure at any stage of handling one request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Stringified failure
    pub error: String,
}

/// Exactly one of these is written per input line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum BridgeOutput {
    /// `{"status": .., "body": ..}`
    Response(BridgeResponse),
    /// `{"error": ..}`
    Error(ErrorResponse),
}

impl BridgeOutput {
    /// Build an error output from anything displayable
    pub fn error(err: impl std::fmt::Display) -> Self {
        Self::Error(ErrorResponse {
            error: err.to_string(),
        })
    }

    /// Whether this is an error output
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<BridgeResponse> for BridgeOutput {
    fn from(response: BridgeResponse) -> Self {
        Self::Response(response)
    }
}

impl From<BridgeError> for BridgeOutput {
    fn from(err: BridgeError) -> Self {
        Self::error(err)
    }
}
