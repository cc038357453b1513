//! Integration tests for the `cratedb` binary
//!
//! Argument handling and local failures run everywhere. The round-trip test
//! at the bottom needs a node on localhost:4200 and is skipped otherwise.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SERVER_URL: &str = "http://127.0.0.1:4200";

fn is_server_running() -> bool {
    std::net::TcpStream::connect("127.0.0.1:4200")
        .map(|_| true)
        .unwrap_or(false)
}

/// CLI command that never picks up the user's own config file
fn create_cli_command(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cratedb").unwrap();
    cmd.arg("--config").arg(config_dir.path().join("config.toml"));
    cmd
}

#[test]
fn test_cli_help_command() {
    let dir = TempDir::new().unwrap();
    let mut cmd = create_cli_command(&dir);
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Command-line client for CrateDB"))
        .stdout(predicate::str::contains("--url"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("sql"))
        .stdout(predicate::str::contains("blob"));
}

#[test]
fn test_cli_blob_help() {
    let dir = TempDir::new().unwrap();
    let mut cmd = create_cli_command(&dir);
    cmd.args(["blob", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("put"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("create-table"))
        .stdout(predicate::str::contains("drop-table"));
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    let mut cmd = create_cli_command(&dir);
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_requires_subcommand() {
    let dir = TempDir::new().unwrap();
    create_cli_command(&dir).assert().failure();
}

#[test]
fn test_cli_sql_requires_statement() {
    let dir = TempDir::new().unwrap();
    let mut cmd = create_cli_command(&dir);
    cmd.arg("sql");

    cmd.assert().failure().stderr(predicate::str::contains("STATEMENT"));
}

#[test]
fn test_cli_json_conflicts_with_format() {
    let dir = TempDir::new().unwrap();
    let mut cmd = create_cli_command(&dir);
    cmd.args(["--json", "--format", "table", "sql", "SELECT 1"]);

    cmd.assert().failure();
}

#[test]
fn test_cli_invalid_args_json() {
    let dir = TempDir::new().unwrap();
    let mut cmd = create_cli_command(&dir);
    cmd.args(["sql", "SELECT ?", "--args", "{\"not\": \"an array\"}"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--args must be a JSON array"));
}

#[test]
fn test_cli_create_missing_schema_file() {
    let dir = TempDir::new().unwrap();
    let mut cmd = create_cli_command(&dir);
    cmd.arg("create").arg(dir.path().join("absent.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("File error"));
}

#[test]
fn test_cli_blob_put_missing_file() {
    let dir = TempDir::new().unwrap();
    let mut cmd = create_cli_command(&dir);
    cmd.args(["blob", "put", "images"]).arg(dir.path().join("absent.bin"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_cli_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[server\n").unwrap();

    let mut cmd = create_cli_command(&dir);
    cmd.args(["sql", "SELECT 1"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_cli_unreachable_node() {
    let dir = TempDir::new().unwrap();
    let mut cmd = create_cli_command(&dir);
    cmd.args(["-u", "http://127.0.0.1:1", "--timeout", "2", "sql", "SELECT 1"]);

    cmd.assert().failure().stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_cli_sql_and_blob_round_trip() {
    if !is_server_running() {
        eprintln!("Server not running at {}. Skipping test.", SERVER_URL);
        return;
    }

    let dir = TempDir::new().unwrap();
    let table = format!(
        "cli_blobs_{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis()
    );

    let mut cmd = create_cli_command(&dir);
    cmd.args(["-u", SERVER_URL, "--json", "sql", "SELECT ? AS answer", "--args", "[42]"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"answer\": 42"));

    create_cli_command(&dir)
        .args(["-u", SERVER_URL, "blob", "create-table", &table, "--shards", "1"])
        .assert()
        .success();

    let payload = dir.path().join("payload.txt");
    fs::write(&payload, b"hello from the cli").unwrap();

    let put = create_cli_command(&dir)
        .args(["-u", SERVER_URL, "blob", "put", &table])
        .arg(&payload)
        .assert()
        .success();
    let hash = String::from_utf8(put.get_output().stdout.clone()).unwrap();
    let hash = hash.trim().to_string();
    assert_eq!(hash.len(), 40);

    create_cli_command(&dir)
        .args(["-u", SERVER_URL, "blob", "put", &table])
        .arg(&payload)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let target = dir.path().join("fetched.txt");
    create_cli_command(&dir)
        .args(["-u", SERVER_URL, "blob", "get", &table, &hash, "-o"])
        .arg(&target)
        .assert()
        .success();
    assert_eq!(fs::read(&target).unwrap(), b"hello from the cli");

    create_cli_command(&dir)
        .args(["-u", SERVER_URL, "blob", "drop-table", &table])
        .assert()
        .success();
}
