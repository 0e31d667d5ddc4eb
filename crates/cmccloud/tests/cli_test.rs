#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cmc() -> Command {
    let mut cmd = Command::cargo_bin("cmc").unwrap();
    cmd.env_remove("CMC_API_KEY")
        .env_remove("CMC_API_URL")
        .env_remove("CMC_REQUEST_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

/// Run `cmc` off the async runtime so the mock server keeps serving
async fn run(args: Vec<String>) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmc().args(&args).assert())
        .await
        .unwrap()
}

fn args(server: &MockServer, rest: &[&str]) -> Vec<String> {
    let mut args = vec![
        "--api-key".to_string(),
        "test-key".to_string(),
        "--api-url".to_string(),
        server.uri(),
    ];
    args.extend(rest.iter().map(|s| s.to_string()));
    args
}

#[test]
fn test_cli_help() {
    cmc().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CMC Cloud"))
        .stdout(predicate::str::contains("server"))
        .stdout(predicate::str::contains("volume"))
        .stdout(predicate::str::contains("firewall-vpc"))
        .stdout(predicate::str::contains("task"));
}

#[test]
fn test_cli_version() {
    cmc().arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cmc"));
}

#[test]
fn test_server_stop_help() {
    cmc().args(["server", "stop", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<ID>"))
        .stdout(predicate::str::contains("--profile"));
}

#[test]
fn test_unknown_profile_rejected() {
    cmc().args(["--api-key", "k", "task", "wait", "t-1", "--profile", "forever"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown profile"));
}

#[test]
fn test_missing_api_key() {
    cmc().args(["server", "info", "s-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CMC_API_KEY"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/info.json"))
        .and(query_param("id", "s-1"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"uuid": "s-1", "name": "web-01", "state": "Running",
                "cpu": 2, "ram_size": 4, "root_size": 40}"#,
        ))
        .mount(&server)
        .await;

    run(args(&server, &["server", "info", "s-1"]))
        .await
        .success()
        .stdout(predicate::str::contains("web-01"))
        .stdout(predicate::str::contains("2 vCPU / 4 GB RAM / 40 GB disk"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_stop_waits_for_task() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/server_action/stop.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"jobid": "t-1"}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/task/info.json"))
        .and(query_param("id", "t-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"id": "t-1", "status": "DONE"}"#),
        )
        .mount(&server)
        .await;

    run(args(&server, &["server", "stop", "s-1", "--profile", "short"]))
        .await
        .success()
        .stdout(predicate::str::contains("Server stopped"))
        .stdout(predicate::str::contains("t-1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unpaid_resize_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/volume/resize.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"jobid": "t-2", "price": 5000, "paid": false}"#,
        ))
        .mount(&server)
        .await;

    run(args(&server, &["volume", "resize", "v-1", "--size", "200"]))
        .await
        .failure()
        .stderr(predicate::str::contains("not paid"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_api_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/templates.json"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_string(r#"{"error_code": 0, "error_text": "permission denied"}"#),
        )
        .mount(&server)
        .await;

    run(args(&server, &["image", "list"]))
        .await
        .failure()
        .stderr(predicate::str::contains("Error 403: permission denied"));
}
