//! HTTP transport implementation
//!
//! Provides an HTTP client that implements the Transport trait.
//! One request in, one response out: no retries and no rate limiting.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
