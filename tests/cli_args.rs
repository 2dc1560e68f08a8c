//! Tests for the command-line interface, run against the built binary.

mod common;

use common::dead_base_url;
use common::mock_server::{MockResponse, MockServer};
use std::process::Command;
use tempfile::TempDir;

fn scorekeeper_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scorekeeper"));
    cmd.arg("--config")
        .arg(dir.path().join("config.toml"))
        .env("RUST_LOG", "error");
    cmd
}

fn offline_args(dir: &TempDir) -> Vec<String> {
    vec![
        "--server".to_string(),
        dead_base_url(),
        "--fallback".to_string(),
        dir.path().join("fallback.json").display().to_string(),
    ]
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let output = scorekeeper_cmd(&dir)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["serve", "show", "add", "set", "reset"] {
        assert!(stdout.contains(command), "missing '{}' in help", command);
    }
}

#[test]
fn test_offline_add_set_reset() {
    let dir = TempDir::new().unwrap();

    let output = scorekeeper_cmd(&dir)
        .arg("set")
        .arg("5")
        .args(offline_args(&dir))
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Current Score: 5"));
    assert!(stdout.contains("High Score:    5"));
    assert!(stdout.contains("offline"));

    let output = scorekeeper_cmd(&dir)
        .arg("add")
        .args(offline_args(&dir))
        .output()
        .expect("Failed to execute command");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Current Score: 6"));

    let output = scorekeeper_cmd(&dir)
        .arg("reset")
        .args(offline_args(&dir))
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Current Score: 0"));
    assert!(stdout.contains("High Score:    6"));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[client]\nbase_url = \"nope\"\n").unwrap();

    let output = scorekeeper_cmd(&dir)
        .arg("show")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Config validation failed"));
}

#[test]
fn test_set_requires_score() {
    let dir = TempDir::new().unwrap();
    let output = scorekeeper_cmd(&dir)
        .arg("set")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[tokio::test]
async fn test_add_stops_when_initial_read_is_malformed() {
    let mock = MockServer::start().await;
    mock.enqueue_response(MockResponse::json("<html>oops</html>")).await;
    mock.enqueue_response(MockResponse::json(
        r#"{"success":true,"currentScore":1,"highScore":1}"#,
    ))
    .await;

    let dir = TempDir::new().unwrap();
    let mut cmd = scorekeeper_cmd(&dir);
    cmd.arg("add")
        .arg("--server")
        .arg(mock.base_url())
        .arg("--fallback")
        .arg(dir.path().join("fallback.json"));

    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: An unexpected error occurred"));

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
}
