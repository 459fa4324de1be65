//! Integration tests for structured exit codes.
//!
//! These tests verify that qradar-cli returns the correct exit codes
//! for different failure modes, enabling reliable shell scripting.

mod common;

use common::{qradar_cmd, qradar_cmd_with_console};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCHES: &str = "/api/ariel/searches";

#[test]
fn test_missing_console_returns_exit_code_2() {
    qradar_cmd()
        .args(["status", "abc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to build configuration"));
}

#[tokio::test]
async fn test_missing_credentials_returns_exit_code_2_without_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .env_remove("QRADAR_SEC_TOKEN")
        .args(["search", "SELECT 1"])
        .assert()
        .code(2);
}

#[test]
fn test_connection_refused_returns_exit_code_3() {
    // Port 1 is reserved and should refuse connections
    qradar_cmd_with_console("http://127.0.0.1:1")
        .args(["status", "abc"])
        .assert()
        .code(3);
}

#[tokio::test]
async fn test_unknown_search_returns_exit_code_4() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{SEARCHES}/missing")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 1002,
            "message": "Search does not exist"
        })))
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .args(["status", "missing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Search does not exist"));
}

#[tokio::test]
async fn test_rejected_submission_returns_exit_code_5() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCHES))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Invalid AQL"
        })))
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .args(["search", "SELEC nonsense"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Invalid AQL"));
}

#[tokio::test]
async fn test_failed_search_returns_exit_code_6() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCHES))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"search_id": "bad"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{SEARCHES}/bad")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_id": "bad",
            "status": "CANCELED"
        })))
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .args(["search", "SELECT 1"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("CANCELED"));
}

#[tokio::test]
async fn test_malformed_results_returns_exit_code_9() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{SEARCHES}/odd/results")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [],
            "flows": []
        })))
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .args(["results", "odd"])
        .assert()
        .code(9);
}

#[test]
fn test_invalid_output_format_is_general_error() {
    qradar_cmd_with_console("http://127.0.0.1:1")
        .args(["-o", "xml", "status", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid output format"));
}
