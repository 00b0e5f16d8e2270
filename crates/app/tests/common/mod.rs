#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod http_server;

use std::net::TcpListener;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;

pub fn cli_cmd(data_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("courier");
    cmd.env_remove("COURIER_DATA_DIR")
        .env_remove("COURIER_DEFAULT_ENVIRONMENT_ID")
        .env_remove("COURIER_USER_AGENT")
        .env_remove("COURIER_MAX_REDIRECTS")
        .env("RUST_LOG", "warn")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

pub fn parse_created_id(stdout: &[u8], label: &str) -> String {
    String::from_utf8_lossy(stdout)
        .trim()
        .split_once(": ")
        .map(|(_, id)| id.to_string())
        .unwrap_or_else(|| panic!("Expected id in '{label}' output"))
}

/// Returns a local port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().expect("Failed to get local addr").port()
}
