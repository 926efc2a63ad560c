//! Venice API bridge
//!
//! Reads one JSON request per line from stdin and writes one JSON result per
//! line to stdout:
//!
//! ```bash
//! echo '{"path":"/api/v1/models","method":"GET"}' | VENICE_API_KEY=... venice-bridge
//! ```
//!
//! Environment: `VENICE_API_BASE`, `VENICE_API_KEY`, `VENICE_BRIDGE_DISPATCH`,
//! `RUST_LOG`. A `.env` file in the working directory is honored.

use std::sync::Arc;

use anyhow::Context;
use stdio_bridge::{Bridge, BridgeConfig, Dispatcher};
use stdio_bridge_transport::HttpTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    stdio_bridge::logging::init();

    let config = BridgeConfig::from_env().context("invalid bridge configuration")?;
    config.warn_if_missing_api_key();

    tracing::debug!(
        base_url = %config.base_url,
        dispatch = %config.dispatch,
        "venice-bridge starting"
    );

    let transport = Arc::new(HttpTransport::new()?);
    let dispatcher = Dispatcher::new(Bridge::new(config, transport));

    if let Err(err) = dispatcher
        .run(tokio::io::stdin(), tokio::io::stdout())
        .await
    {
        tracing::error!(error = %err, "bridge stopped");
        return Err(err.into());
    }

    Ok(())
}
