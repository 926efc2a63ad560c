//! Subprocess forwarding
//!
//! Runs one external command attached directly to the parent's standard
//! streams and reports the exit code the parent should terminate with.

pub mod forwarder;
pub mod process;

pub use forwarder::{ProcessForwarder, exit_code_for};
pub use process::ProcessConfig;
