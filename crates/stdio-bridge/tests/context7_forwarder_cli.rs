//! End-to-end tests for the `context7-forwarder` binary
//!
//! The default command needs `npx` and network access, so these tests pass an
//! explicit command line instead.

#![cfg(unix)]

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

fn forwarder() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_context7-forwarder"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[tokio::test]
async fn test_child_exit_code_is_mirrored() {
    let status = forwarder()
        .args(["sh", "-c", "exit 3"])
        .status()
        .await
        .unwrap();
    assert_eq!(status.code(), Some(3));
}

#[tokio::test]
async fn test_child_killed_by_signal_exits_zero() {
    let status = forwarder()
        .args(["sh", "-c", "kill -9 $$"])
        .status()
        .await
        .unwrap();
    assert_eq!(status.code(), Some(0));
}

#[tokio::test]
async fn test_child_shares_parent_stdio() {
    let mut child = forwarder()
        .args(["sh", "-c", "read line; echo \"got $line\"; echo oops >&2"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"ping\n").await.unwrap();
    drop(stdin);

    let output = child.wait_with_output().await.unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "got ping\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("oops"));
}

#[tokio::test]
async fn test_spawn_failure_is_fatal() {
    let output = forwarder()
        .arg("/nonexistent/stdio-bridge-test-binary")
        .output()
        .await
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to spawn"));
}
