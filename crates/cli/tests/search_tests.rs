//! Integration tests for `qradar-cli search`, `status`, `results` and `delete`.

mod common;

use common::{qradar_cmd, qradar_cmd_with_console};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCHES: &str = "/api/ariel/searches";

async fn mount_completed_search(server: &MockServer, search_id: &str, envelope: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(SEARCHES))
        .and(header("SEC", "test-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "search_id": search_id,
            "status": "WAIT"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{SEARCHES}/{search_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_id": search_id,
            "status": "COMPLETED",
            "progress": 100
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{SEARCHES}/{search_id}/results")))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
        .mount(server)
        .await;
}

#[test]
fn test_search_help() {
    let mut cmd = qradar_cmd();
    cmd.args(["search", "--help"]).assert().success().stdout(
        predicate::str::contains("Run an AQL search")
            .and(predicate::str::contains("--limit"))
            .and(predicate::str::contains("--start"))
            .and(predicate::str::contains("--end"))
            .and(predicate::str::contains("--priority"))
            .and(predicate::str::contains("--no-wait")),
    );
}

#[test]
fn test_search_requires_query_argument() {
    let mut cmd = qradar_cmd();
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<QUERY>"));
}

#[tokio::test]
async fn test_search_json_output_and_cleanup() {
    let server = MockServer::start().await;
    mount_completed_search(
        &server,
        "cli-1",
        json!({"events": [{"sourceip": "10.0.0.1", "qid": 5}, {"sourceip": "10.0.0.2"}]}),
    )
    .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{SEARCHES}/cli-1")))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let output = qradar_cmd_with_console(&server.uri())
        .args(["-o", "json", "search", "SELECT sourceip, qid FROM events"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        rows,
        json!([{"sourceip": "10.0.0.1", "qid": 5}, {"sourceip": "10.0.0.2"}])
    );
}

#[tokio::test]
async fn test_search_csv_output_with_modifiers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCHES))
        .and(body_string_contains("LIMIT+2"))
        .and(body_string_contains("START+1714521600000+STOP+1714525200000"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"search_id": "cli-2"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_completed_search(
        &server,
        "cli-2",
        json!({"flows": [{"a": "x, y", "b": 1}, {"b": 2, "c": true}]}),
    )
    .await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .args([
            "-o",
            "csv",
            "search",
            "SELECT * FROM flows",
            "--limit",
            "2",
            "--start",
            "2024-05-01T00:00:00Z",
            "--end",
            "2024-05-01T01:00:00Z",
        ])
        .assert()
        .success()
        .stdout("a,b,c\n\"x, y\",1,\n,2,true\n");
}

#[tokio::test]
async fn test_search_table_output_empty() {
    let server = MockServer::start().await;
    mount_completed_search(&server, "cli-3", json!({"events": []})).await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .args(["search", "SELECT * FROM events"])
        .assert()
        .success()
        .stdout("No results found.\n");
}

#[tokio::test]
async fn test_search_no_cleanup_keeps_search() {
    let server = MockServer::start().await;
    mount_completed_search(&server, "cli-4", json!({"events": [{"a": 1}]})).await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .args(["-o", "ndjson", "search", "SELECT a FROM events", "--no-cleanup"])
        .assert()
        .success()
        .stdout("{\"a\":1}\n");
}

#[tokio::test]
async fn test_search_no_wait_prints_search_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCHES))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "search_id": "cli-5",
            "status": "WAIT"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .args(["search", "SELECT * FROM events", "--no-wait"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Search ID: cli-5").and(predicate::str::contains("Status: WAIT")));
}

#[tokio::test]
async fn test_status_command() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{SEARCHES}/cli-6")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_id": "cli-6",
            "status": "EXECUTE",
            "progress": 30,
            "record_count": 1200
        })))
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .args(["status", "cli-6"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Status: EXECUTE")
                .and(predicate::str::contains("Progress: 30%"))
                .and(predicate::str::contains("Records: 1200")),
        );
}

#[tokio::test]
async fn test_results_command_leaves_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{SEARCHES}/cli-7/results")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [{"username": "alice"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .args(["results", "cli-7"])
        .assert()
        .success()
        .stdout("username\nalice\n");
}

#[tokio::test]
async fn test_delete_command() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{SEARCHES}/cli-8")))
        .and(header("SEC", "test-token"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .args(["delete", "cli-8"])
        .assert()
        .success()
        .stdout("Search cli-8 deleted.\n");
}

#[tokio::test]
async fn test_basic_auth_from_flags() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{SEARCHES}/cli-9")))
        .and(header("username", "analyst"))
        .and(header("password", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_id": "cli-9",
            "status": "COMPLETED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    qradar_cmd_with_console(&server.uri())
        .env_remove("QRADAR_SEC_TOKEN")
        .args(["-u", "analyst", "-p", "s3cret", "status", "cli-9"])
        .assert()
        .success();
}
