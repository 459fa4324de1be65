//! Integration tests for graceful Ctrl+C/SIGINT handling.
//!
//! These tests are Unix-only because they send SIGINT to child process.
//! We assert:
//! - exit code is 130
//! - stderr contains cancellation message
//! - the interrupted search is deleted on the console

#![cfg(unix)]

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::Notify;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn qradar_cli_bin() -> &'static std::path::Path {
    assert_cmd::cargo::cargo_bin!("qradar-cli")
}

fn send_sigint(pid: u32) {
    // SAFETY: standard Unix kill syscall
    unsafe {
        libc::kill(pid as i32, libc::SIGINT);
    }
}

#[tokio::test]
async fn test_search_ctrl_c_exits_130_and_deletes_search() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ariel/searches"))
        .and(header("SEC", "test-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "search_id": "long-running",
            "status": "WAIT"
        })))
        .mount(&server)
        .await;

    // Status never completes; the CLI waits between polls, where SIGINT lands.
    let poll_seen = Arc::new(Notify::new());
    let poll_seen_clone = Arc::clone(&poll_seen);

    Mock::given(method("GET"))
        .and(path("/api/ariel/searches/long-running"))
        .respond_with(move |_req: &wiremock::Request| {
            poll_seen_clone.notify_one();
            ResponseTemplate::new(200).set_body_json(json!({
                "search_id": "long-running",
                "status": "EXECUTE",
                "progress": 10
            }))
        })
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/ariel/searches/long-running"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let child = tokio::process::Command::new(qradar_cli_bin())
        .env("DOTENV_DISABLED", "1")
        .env("QRADAR_CONSOLE", server.uri())
        .env("QRADAR_SEC_TOKEN", "test-token")
        .args([
            "--quiet",
            "--output",
            "json",
            "--poll-interval",
            "30",
            "search",
            "SELECT * FROM events",
        ])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn qradar-cli");

    let pid = child.id().expect("child pid");
    tokio::time::timeout(Duration::from_secs(5), poll_seen.notified())
        .await
        .expect("expected status poll before SIGINT");
    // Let the controller reach its pause before signalling.
    tokio::time::sleep(Duration::from_millis(200)).await;
    send_sigint(pid);

    let output = tokio::time::timeout(Duration::from_secs(5), child.wait_with_output())
        .await
        .expect("process should exit promptly")
        .expect("wait_with_output ok");

    assert_eq!(output.status.code(), Some(130));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Operation cancelled by user"));
    assert!(output.stdout.is_empty());
}
