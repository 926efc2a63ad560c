//! stdio-bridge
//!
//! Process-level adapters that expose external services over stdin/stdout.
//!
//! - **HTTP bridge** (`venice-bridge`): reads one JSON request per line,
//!   performs one authenticated HTTP call against the configured upstream,
//!   and writes one JSON line back.
//! - **Process forwarder** (`context7-forwarder`): runs one child process on
//!   the parent's own standard streams and exits with the child's code. See
//!   [`stdio_bridge_transport::ProcessForwarder`].
//!
//! ## Protocol
//!
//! Request:
//! ```json
//! {"path": "/api/v1/chat/completions", "method": "POST", "body": {"model": "llama-3.3-70b"}}
//! ```
//!
//! Response:
//! ```json
//! {"status": 200, "body": "{\"id\":\"chatcmpl-...\"}"}
//! ```
//!
//! Error:
//! ```json
//! {"error": "Connection error: ..."}
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod handler;
pub mod logging;
pub mod protocol;

pub use config::{BridgeConfig, DispatchMode};
pub use dispatch::Dispatcher;
pub use error::{BridgeError, Result};
pub use handler::Bridge;
pub use protocol::{BridgeOutput, BridgeRequest, BridgeResponse, ErrorResponse};
