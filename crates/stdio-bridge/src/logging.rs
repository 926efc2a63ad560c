//! Logging setup shared by the binaries
//!
//! Everything goes to stderr: stdout is reserved for protocol lines (bridge)
//! or belongs to the child process (forwarder).

use std::io;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "warn,stdio_bridge=info,stdio_bridge_transport=info";

/// Always enabled on top of `RUST_LOG`, so startup configuration warnings
/// (such as a missing API key) reach stderr even with `RUST_LOG=off`.
pub const CONFIG_WARNINGS: &str = "stdio_bridge::config=warn";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if let Ok(directive) = CONFIG_WARNINGS.parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_ansi(false))
        .with(filter)
        .try_init();
}
