//! Transparent child-process forwarder
//!
//! The child is attached to the parent's stdin, stdout and stderr; nothing is
//! piped or buffered here. When the child terminates, its exit code becomes
//! the parent's. A child killed by a signal has no exit code and maps to `0`.

use crate::error::{Result, TransportError};
use crate::subprocess::process::ProcessConfig;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Runs one configured command to completion
#[derive(Debug, Clone)]
pub struct ProcessForwarder {
    config: ProcessConfig,
}

impl ProcessForwarder {
    /// Create a forwarder for `config`
    pub fn new(config: ProcessConfig) -> Self {
        Self { config }
    }

    /// Get the process configuration
    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Spawn the child, wait for it, and return the exit code the parent
    /// should terminate with.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Process`] if the operating system refuses
    /// to spawn the command, and [`TransportError::Io`] if waiting on it fails.
    /// No retry is attempted.
    pub async fn run(&self) -> Result<i32> {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .envs(&self.config.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = cmd.spawn().map_err(|e| {
            TransportError::Process(format!(
                "Failed to spawn {}: {}",
                self.config.display_command(),
                e
            ))
        })?;

        tracing::debug!(
            command = %self.config.display_command(),
            pid = child.id(),
            "child process spawned"
        );

        let status = child.wait().await?;
        let code = exit_code_for(status);

        tracing::debug!(%status, code, "child process exited");

        Ok(code)
    }
}

/// Map a child's exit status to the parent's exit code.
///
/// A numeric exit code is passed through unchanged; a missing one (the child
/// was terminated by a signal) becomes `0`.
pub fn exit_code_for(status: ExitStatus) -> i32 {
    status.code().unwrap_or(0)
}
