use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("cmms")
        .env("CMMS_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("cmms")
        .env("CMMS_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("mode = \"demo\""));
    assert!(contents.contains("landing_target = \"/dashboard/\""));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("cmms")
        .env("CMMS_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("cmms")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_login_uses_initialized_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("cmms")
        .env("CMMS_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success();

    // Edit the written template the way a user would
    let contents = fs::read_to_string(&config_path)
        .unwrap()
        .replace("demo_delay_ms = 2000", "demo_delay_ms = 0")
        .replace("landing_target = \"/dashboard/\"", "landing_target = \"/work-orders/\"");
    fs::write(&config_path, contents).unwrap();

    cargo_bin_cmd!("cmms")
        .env("CMMS_HOME", dir.path())
        .env_remove("CMMS_PASSWORD")
        .args(["login", "--username", "demo", "--password", "password"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Redirect: /work-orders/"));

    assert!(dir.path().join("logs").is_dir());
}
