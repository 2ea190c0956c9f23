//! End-to-end tests for the extblock binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Binary running in an empty directory so no stray config file is picked up
fn extblock(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("extblock").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("EXTBLOCK_SERVER")
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    extblock(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fixed"))
        .stdout(predicate::str::contains("custom"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_check_trailing_dot_fails_without_network() {
    let dir = TempDir::new().unwrap();
    extblock(&dir)
        .args(["--server", "http://127.0.0.1:1", "check", "file."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid file name."));
}

#[test]
fn test_check_blank_input_fails() {
    let dir = TempDir::new().unwrap();
    extblock(&dir)
        .args(["check", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a file name."));
}

#[test]
fn test_custom_add_rejects_long_extension() {
    let dir = TempDir::new().unwrap();
    extblock(&dir)
        .args(["--server", "http://127.0.0.1:1", "custom", "add", &"a".repeat(21)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 20 characters"));
}

#[test]
fn test_config_generate_and_validate() {
    let dir = TempDir::new().unwrap();
    extblock(&dir)
        .args(["config", "generate", "--output", "out.toml"])
        .assert()
        .success();
    assert!(dir.path().join("out.toml").exists());

    extblock(&dir)
        .args(["config", "validate", "out.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_show_applies_server_override() {
    let dir = TempDir::new().unwrap();
    extblock(&dir)
        .env("EXTBLOCK_SERVER", "http://uploads.internal:9000")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://uploads.internal:9000"));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("extblock.toml"),
        "[authority]\nbase_url = \"ftp://nope\"\n",
    )
    .unwrap();

    extblock(&dir)
        .args(["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration validation failed"));
}

#[test]
fn test_unreachable_server_reports_network_failure() {
    let dir = TempDir::new().unwrap();
    extblock(&dir)
        .args(["--server", "http://127.0.0.1:1", "check", "virus.exe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("server is reachable"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_reports_blocked_extension() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/check/exe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": true})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    extblock(&dir)
        .args(["--server", &server.uri(), "check", "Virus.EXE"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".exe"))
        .stdout(predicate::str::contains("Blocked"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/fixed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"id": 1, "extension": "exe", "description": "실행 파일", "blocked": true},
                {"id": 2, "extension": "bat", "description": "배치 파일", "blocked": false}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/custom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 1, "extension": "custom1"}]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = extblock(&dir)
        .args(["--server", &server.uri(), "status", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total"], 3);
    assert_eq!(report["blocked"], 2);
    assert_eq!(report["fixed_blocked"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fixed_allow_accepts_leading_dot() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/extensions/fixed"))
        .and(body_json(json!({"extension": "exe", "isBlocked": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/fixed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 1, "extension": "exe", "description": "실행 파일", "blocked": false}]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    extblock(&dir)
        .args(["--server", &server.uri(), "fixed", "allow", ".EXE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Allowing"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_custom_add_accepts_leading_dot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/extensions/custom"))
        .and(body_json(json!({"extension": "sh"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 4, "extension": "sh"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/custom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 4, "extension": "sh"}]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    extblock(&dir)
        .args(["--server", &server.uri(), "custom", "add", ".sh"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".sh"));
}
