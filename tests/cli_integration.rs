//! Integration tests for the `akeyless-secret` binary.
//!
//! These tests run the real binary against a mock gateway and verify:
//! - `schema` output
//! - `read` output, with and without redaction
//! - Configuration errors surface with a non-zero exit

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PATH: &str = "/db/prod/password";

/// Binary command isolated from the user's config and environment.
fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("akeyless-secret").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("AKEYLESS_SECRET_CONFIG")
        .env_remove("AKEYLESS_GATEWAY")
        .env_remove("AKEYLESS_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

async fn gateway_with_secret() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-secret-value"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ PATH: "s3cr3t" })))
        .mount(&server)
        .await;
    server
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn schema_prints_attributes() {
    let home = TempDir::new().unwrap();
    let output = cmd(&home).arg("schema").output().unwrap();

    assert!(output.status.success());
    let schema = stdout_json(&output);
    assert_eq!(schema["type_name"], "akeyless_static_secret");
    assert_eq!(schema["description"], "Static secret data source");
    assert_eq!(schema["attributes"]["path"]["required"], true);
    assert_eq!(schema["attributes"]["value"]["sensitive"], true);
    assert_eq!(schema["attributes"]["get_metadata"]["default"], false);
}

#[tokio::test(flavor = "multi_thread")]
async fn read_redacts_value_by_default() {
    let server = gateway_with_secret().await;
    let home = TempDir::new().unwrap();

    let output = cmd(&home)
        .env("AKEYLESS_TOKEN", "t-cli")
        .args(["read", "--path", PATH, "--gateway", &server.uri()])
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    let state = stdout_json(&output);
    assert_eq!(state["id"], PATH);
    assert_eq!(state["value"], "(sensitive value)");
    assert_eq!(state["version"], 0);
    assert!(!String::from_utf8_lossy(&output.stdout).contains("s3cr3t"));
}

#[tokio::test(flavor = "multi_thread")]
async fn read_show_sensitive() {
    let server = gateway_with_secret().await;
    let home = TempDir::new().unwrap();

    let output = cmd(&home)
        .env("AKEYLESS_TOKEN", "t-cli")
        .env("AKEYLESS_GATEWAY", server.uri())
        .args(["read", "--path", PATH, "--show-sensitive"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(stdout_json(&output)["value"], "s3cr3t");
    assert!(String::from_utf8_lossy(&output.stderr).contains("warning:"));
}

#[tokio::test(flavor = "multi_thread")]
async fn read_uses_config_file() {
    let server = gateway_with_secret().await;
    let home = TempDir::new().unwrap();
    let config = home.path().join("provider.toml");
    std::fs::write(
        &config,
        format!(
            "api_gateway_address = {:?}\ntoken = \"t-file\"\n",
            server.uri()
        ),
    )
    .unwrap();

    cmd(&home)
        .args(["read", "--path", PATH, "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("(sensitive value)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn read_api_error_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-secret-value"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"not found"}"#))
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    cmd(&home)
        .env("AKEYLESS_TOKEN", "t-cli")
        .args(["read", "--path", PATH, "--gateway", &server.uri()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            r#"can't get Secret value: {"error":"not found"}"#,
        ));
}

#[test]
fn read_without_token_fails() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["read", "--path", PATH, "--gateway", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no auth token configured"));
}

#[test]
fn missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["read", "--path", PATH, "--config", "/nonexistent/provider.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn invalid_gateway_flag_fails() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .env("AKEYLESS_TOKEN", "t-cli")
        .args(["read", "--path", PATH, "--gateway", "not-a-url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid api_gateway_address"));
}
