//! End-to-end tests for environment and template commands.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::http_server::TestHttpServer;
use common::{cli_cmd, parse_created_id};
use predicates::str::contains;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn default_environment_is_listed_without_being_written() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    cli_cmd(temp_dir.path())
        .args(["env", "list"])
        .assert()
        .success()
        .stdout(contains("* default - Default (1 variables)"));

    assert!(!temp_dir.path().join("api_environments.json").exists());
}

#[test]
fn environment_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let data_dir = temp_dir.path();

    let output = cli_cmd(data_dir)
        .args(["env", "add", "Staging"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = parse_created_id(&output.stdout, "env add");

    cli_cmd(data_dir)
        .args(["env", "set", &id, "HOST", "staging.test"])
        .assert()
        .success();
    cli_cmd(data_dir)
        .args(["env", "set", &id, "TOKEN", "t"])
        .assert()
        .success();
    cli_cmd(data_dir)
        .args(["env", "unset", &id, "TOKEN"])
        .assert()
        .success();
    cli_cmd(data_dir)
        .args(["env", "rename", &id, "Stage"])
        .assert()
        .success();

    let output = cli_cmd(data_dir)
        .args(["env", "export", &id])
        .output()
        .unwrap();
    let exported: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        exported,
        serde_json::json!({
            "name": "Stage",
            "variables": [{"key": "HOST", "value": "staging.test"}]
        })
    );

    cli_cmd(data_dir)
        .args(["env", "list"])
        .assert()
        .success()
        .stdout(contains("* default"))
        .stdout(contains(format!("  {id} - Stage (1 variables)")));

    cli_cmd(data_dir)
        .args(["env", "delete", &id])
        .assert()
        .success();
    cli_cmd(data_dir)
        .args(["env", "show", &id])
        .assert()
        .failure()
        .stderr(contains("environment not found"));
}

#[test]
fn unset_missing_variable_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    cli_cmd(temp_dir.path())
        .args(["env", "unset", "default", "NOPE"])
        .assert()
        .failure()
        .stderr(contains("no variable named NOPE"));
}

#[test]
fn template_save_search_and_send() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let data_dir = temp_dir.path();
    let server = TestHttpServer::spawn_json("200 OK", r#"{"token":"abc"}"#);

    let output = cli_cmd(data_dir)
        .args(["template", "save", "-n", "Login", "POST", "{{BASE_URL}}/login"])
        .args(["-d", r#"{"user":"{{USER}}"}"#])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = parse_created_id(&output.stdout, "template save");

    cli_cmd(data_dir)
        .args(["template", "list", "--search", "LOG"])
        .assert()
        .success()
        .stdout(contains("Login [POST {{BASE_URL}}/login]"));
    cli_cmd(data_dir)
        .args(["template", "list", "--search", "users"])
        .assert()
        .success()
        .stdout(contains("No templates found"));

    cli_cmd(data_dir)
        .args(["env", "set", "default", "BASE_URL", &server.base_url])
        .assert()
        .success();
    cli_cmd(data_dir)
        .args(["env", "set", "default", "USER", "ada"])
        .assert()
        .success();

    cli_cmd(data_dir)
        .args(["template", "send", &id])
        .assert()
        .success()
        .stdout(contains("\"token\": \"abc\""));

    let request = server.requests().remove(0);
    assert!(request.starts_with("POST /login HTTP/1.1"));
    assert!(request.ends_with(r#"{"user":"ada"}"#));

    cli_cmd(data_dir)
        .args(["template", "delete", &id])
        .assert()
        .success();
    cli_cmd(data_dir)
        .args(["template", "show", &id])
        .assert()
        .failure();
}

#[test]
fn blank_template_name_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    cli_cmd(temp_dir.path())
        .args(["template", "save", "-n", "  ", "GET", "http://x"])
        .assert()
        .failure()
        .stderr(contains("template name must not be empty"));
}

#[test]
fn blank_environment_names_are_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let data_dir = temp_dir.path();

    cli_cmd(data_dir)
        .args(["env", "add", " "])
        .assert()
        .failure()
        .stderr(contains("environment name must not be empty"));
    cli_cmd(data_dir)
        .args(["env", "rename", "default", ""])
        .assert()
        .failure()
        .stderr(contains("environment name must not be empty"));
    cli_cmd(data_dir)
        .args(["env", "show", "default"])
        .assert()
        .success()
        .stdout(contains("\"name\": \"Default\""));
}

#[test]
fn settings_file_selects_environment() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let data_dir = temp_dir.path();

    let output = cli_cmd(data_dir)
        .args(["env", "add", "Staging"])
        .output()
        .unwrap();
    let id = parse_created_id(&output.stdout, "env add");
    std::fs::write(
        data_dir.join("courier.toml"),
        format!("default_environment_id = \"{id}\"\n"),
    )
    .unwrap();

    cli_cmd(data_dir)
        .args(["env", "list"])
        .assert()
        .success()
        .stdout(contains(format!("* {id} - Staging")));
}
