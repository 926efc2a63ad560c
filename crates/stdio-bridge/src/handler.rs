//! Single-request handling
//!
//! A [`Bridge`] turns one input chunk into exactly one [`BridgeOutput`]. It
//! never fails: every error along the way becomes an `{"error": ...}` output.

use std::sync::Arc;

use stdio_bridge_transport::{HttpRequest, Transport};

use crate::config::BridgeConfig;
use crate::endpoint::join_path;
use crate::error::Result;
use crate::protocol::{BridgeOutput, BridgeRequest, BridgeResponse};

/// Stateless request handler. Cheap to clone; clones share the
/// configuration and transport.
#[derive(Clone)]
pub struct Bridge {
    config: Arc<BridgeConfig>,
    transport: Arc<dyn Transport>,
}

impl Bridge {
    /// Create a bridge over `transport`
    pub fn new(config: BridgeConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Translate a bridge request into the outbound HTTP request
    pub fn build_request(&self, request: &BridgeRequest) -> Result<HttpRequest> {
        let url = join_path(&self.config.base_url, &request.path)?;

        let mut http = HttpRequest::new(request.effective_method(), url.as_str())
            .with_header("Authorization", self.config.authorization_header())
            .with_header("Content-Type", "application/json");

        if let Some(body) = request.encoded_body()? {
            http = http.with_body(body);
        }

        Ok(http)
    }

    /// Perform the upstream call for one parsed request
    pub async fn forward(&self, request: &BridgeRequest) -> Result<BridgeResponse> {
        let http = self.build_request(request)?;
        let response = self.transport.send_http(http).await?;

        Ok(BridgeResponse {
            status: response.status,
            body: response.text_lossy(),
        })
    }

    /// Handle one input chunk end to end
    pub async fn handle_chunk(&self, chunk: &str) -> BridgeOutput {
        let request = match BridgeRequest::parse(chunk) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %err, "rejecting unparsable input");
                return err.into();
            }
        };

        match self.forward(&request).await {
            Ok(response) => {
                tracing::debug!(
                    method = request.effective_method(),
                    path = %request.path,
                    status = response.status,
                    "request forwarded"
                );
                response.into()
            }
            Err(err) => {
                tracing::debug!(
                    method = request.effective_method(),
                    path = %request.path,
                    error = %err,
                    "request failed"
                );
                err.into()
            }
        }
    }
}
