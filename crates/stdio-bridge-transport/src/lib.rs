//! Transport layer for stdio-bridge
//!
//! Provides the two outbound mechanisms the bridges rely on: a trait-based
//! HTTP transport and a transparent subprocess forwarder.
//!
//! # Architecture
//!
//! - **Transport trait**: Generic interface for sending one HTTP request
//! - **HTTP transport**: Upstream API client via reqwest
//! - **Subprocess forwarder**: Child process with inherited stdio whose exit
//!   code becomes the parent's
//! - **Error handling**: Unified error type across transports
//!
//! # Usage
//!
//! ```ignore
//! use stdio_bridge_transport::{HttpRequest, HttpTransport, Transport};
//!
//! let transport = HttpTransport::new()?;
//! let request = HttpRequest::new("GET", "https://api.venice.ai/api/v1/models")
//!     .with_header("Authorization", "Bearer sk-...");
//! let response = transport.send_http(request).await?;
//! println!("{} {}", response.status, response.text_lossy());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod subprocess;
pub mod traits;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
pub use subprocess::{ProcessConfig, ProcessForwarder};
pub use traits::{HttpRequest, HttpResponse, Transport};
