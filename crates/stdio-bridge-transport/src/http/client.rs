//! HTTP transport client implementation
//!
//! Implements the Transport trait for single-shot HTTP requests. Every call
//! goes to the network exactly once; failures are returned to the caller
//! unchanged.

use crate::error::{Result, TransportError};
use crate::traits::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use reqwest::Method;
use std::sync::Arc;
use std::time::Duration;

/// HTTP transport implementation
///
/// Handles HTTP requests with:
/// - Connection pooling
/// - Transport-level timeouts
/// - Method validation before anything is sent
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<ReqwestClient>,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            timeout: config.timeout,
        })
    }

    /// Overall request timeout applied by the underlying client
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Methods whose case is normalized; any other token is sent as written
const NORMALIZED_METHODS: [Method; 6] = [
    Method::DELETE,
    Method::GET,
    Method::HEAD,
    Method::OPTIONS,
    Method::POST,
    Method::PUT,
];

/// Parse a method string the way `fetch` does: the six standard methods
/// match case-insensitively, anything else must be a valid HTTP token and
/// keeps its case.
pub fn parse_method(method: &str) -> Result<Method> {
    if let Some(known) = NORMALIZED_METHODS
        .iter()
        .find(|m| m.as_str().eq_ignore_ascii_case(method))
    {
        return Ok(known.clone());
    }
    Method::from_bytes(method.as_bytes())
        .map_err(|_| TransportError::InvalidMethod(method.to_string()))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = parse_method(&request.method)?;

        if request.body.is_some() && (method == Method::GET || method == Method::HEAD) {
            return Err(TransportError::InvalidRequest(format!(
                "Request with {} method cannot have body",
                method
            )));
        }

        let mut req = self.client.request(method, &request.url);

        // Add headers
        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add body if present
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await?;

        let status = response.status().as_u16();

        // Collect body; headers are not part of the bridge's reply
        let body = response.bytes().await?.to_vec();

        tracing::trace!(status, bytes = body.len(), "upstream response received");

        Ok(HttpResponse::new(status, body))
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            connect_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 10,
        }
    }
}
