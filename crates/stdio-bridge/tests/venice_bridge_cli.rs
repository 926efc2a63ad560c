//! End-to-end tests driving the `venice-bridge` binary over real pipes

use std::process::Stdio;

use stdio_bridge::BridgeOutput;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Run {
    stdout: Vec<BridgeOutput>,
    stderr: String,
    success: bool,
}

async fn run_bridge(envs: &[(&str, &str)], input: &str) -> Run {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_venice-bridge"));
    cmd.env_remove("VENICE_API_KEY")
        .env_remove("VENICE_API_BASE")
        .env_remove("VENICE_BRIDGE_DISPATCH")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn().expect("spawn venice-bridge");
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input.as_bytes()).await.unwrap();
    // Closing stdin lets the bridge drain and exit
    drop(stdin);

    let output = child.wait_with_output().await.unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    Run {
        stdout: stdout
            .lines()
            .map(|l| serde_json::from_str(l).expect("stdout carries only JSON lines"))
            .collect(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    }
}

#[tokio::test]
async fn test_missing_key_warns_once_and_still_forwards() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/models"))
        .respond_with(ResponseTemplate::new(401).set_body_string("missing key"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let run = run_bridge(
        &[("VENICE_API_BASE", uri.as_str())],
        "{\"path\":\"/api/v1/models\"}\n{\"path\":\"/api/v1/models\"}\n",
    )
    .await;

    assert!(run.success, "stderr: {}", run.stderr);
    assert_eq!(run.stdout.len(), 2);
    assert_eq!(run.stderr.matches("VENICE_API_KEY is not set").count(), 1);
    assert_eq!(run.stderr.lines().filter(|l| l.contains("WARN")).count(), 1);

    let received = mock_server.received_requests().await.unwrap();
    for request in &received {
        let auth = request
            .headers
            .get("authorization")
            .expect("authorization header present")
            .to_str()
            .unwrap();
        assert_eq!(auth.trim_end(), "Bearer");
    }
}

#[tokio::test]
async fn test_key_present_means_no_warning() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let run = run_bridge(
        &[("VENICE_API_BASE", uri.as_str()), ("VENICE_API_KEY", "vk-test")],
        "{\"path\":\"/x\",\"method\":\"GET\"}\n",
    )
    .await;

    assert!(run.success);
    assert!(!run.stderr.contains("VENICE_API_KEY"));
    assert_eq!(run.stdout.len(), 1);
}

#[tokio::test]
async fn test_malformed_line_answered_and_loop_continues() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let run = run_bridge(
        &[("VENICE_API_BASE", uri.as_str()), ("VENICE_API_KEY", "vk")],
        "{\"path\":\n{\"path\":\"/x\"}\n",
    )
    .await;

    assert!(run.success);
    assert_eq!(run.stdout.len(), 2);
    assert!(run.stdout[0].is_error());
    assert!(!run.stdout[1].is_error());
}

#[tokio::test]
async fn test_invalid_base_url_is_fatal() {
    let run = run_bridge(&[("VENICE_API_BASE", "not a url")], "{\"path\":\"/x\"}\n").await;

    assert!(!run.success);
    assert!(run.stdout.is_empty());
    assert!(run.stderr.contains("invalid bridge configuration"));
}

#[tokio::test]
async fn test_missing_key_warning_survives_quiet_log_filter() {
    for filter in ["off", "error"] {
        let run = run_bridge(&[("RUST_LOG", filter)], "").await;

        assert!(run.success, "RUST_LOG={filter}, stderr: {}", run.stderr);
        assert!(run.stdout.is_empty());
        assert_eq!(
            run.stderr.matches("VENICE_API_KEY is not set").count(),
            1,
            "RUST_LOG={filter}, stderr: {}",
            run.stderr
        );
    }
}
