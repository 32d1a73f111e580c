use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Demo mode without the simulated delay.
fn demo_home() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[auth]\nmode = \"demo\"\ndemo_delay_ms = 0\n",
    )
    .unwrap();
    dir
}

fn http_home(endpoint: &str) -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        format!("[auth]\nmode = \"http\"\nendpoint = \"{endpoint}\"\ntimeout_secs = 5\n"),
    )
    .unwrap();
    dir
}

fn login(home: &Path, username: &str, password: &str) -> assert_cmd::assert::Assert {
    cargo_bin_cmd!("cmms")
        .env("CMMS_HOME", home)
        .env_remove("CMMS_PASSWORD")
        .args(["login", "--username", username, "--password", password])
        .assert()
}

#[test]
fn test_demo_credentials_succeed() {
    let home = demo_home();

    login(home.path(), "demo", "password")
        .success()
        .stdout(predicate::str::contains(
            "[success] Login successful! Redirecting...",
        ))
        .stdout(predicate::str::contains("Redirect: /dashboard/"));
}

#[test]
fn test_wrong_password_fails_with_hint() {
    let home = demo_home();

    login(home.path(), "demo", "wrong-password")
        .failure()
        .stderr(predicate::str::contains(
            "Login failed: Invalid username or password. Try demo/password",
        ))
        .stdout(predicate::str::contains("Redirect").not());
}

#[test]
fn test_short_username_is_rejected_before_sign_in() {
    let home = demo_home();

    login(home.path(), "ab", "password")
        .failure()
        .stdout(predicate::str::contains(
            "[error] Please correct the errors above",
        ))
        .stderr(predicate::str::contains(
            "username: Username must be at least 3 characters",
        ));
}

#[test]
fn test_password_from_env() {
    let home = demo_home();

    cargo_bin_cmd!("cmms")
        .env("CMMS_HOME", home.path())
        .env("CMMS_PASSWORD", "password")
        .args(["login", "--username", "demo"])
        .assert()
        .success();
}

#[tokio::test]
async fn test_http_endpoint_accepts() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .and(body_json(serde_json::json!({
            "username": "tech.lead",
            "password": "s3cret!!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let home = http_home(&format!("{}/api/login/", mock_server.uri()));

    login(home.path(), "  tech.lead ", "s3cret!!")
        .success()
        .stdout(predicate::str::contains("Redirect: /dashboard/"));
}

#[tokio::test]
async fn test_http_endpoint_rejection_reason_is_shown() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "ok": false,
            "reason": "Account locked"
        })))
        .mount(&mock_server)
        .await;

    let home = http_home(&format!("{}/api/login/", mock_server.uri()));

    login(home.path(), "tech.lead", "s3cret!!")
        .failure()
        .stderr(predicate::str::contains("Login failed: Account locked"));
}

#[tokio::test]
async fn test_http_server_error_shows_generic_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let home = http_home(&format!("{}/api/login/", mock_server.uri()));

    login(home.path(), "tech.lead", "s3cret!!")
        .failure()
        .stderr(predicate::str::contains(
            "Login failed: An error occurred. Please try again.",
        ));
}

#[tokio::test]
async fn test_empty_username_never_reaches_endpoint() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let home = http_home(&format!("{}/api/login/", mock_server.uri()));

    login(home.path(), "", "password")
        .failure()
        .stderr(predicate::str::contains("username: Username is required"));
}
