//! CLI integration tests
//!
//! These tests verify exit codes and output of the refaudit binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn refaudit() -> Command {
    let mut cmd = Command::cargo_bin("refaudit").unwrap();
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

fn fixture_args() -> Vec<String> {
    let fixtures = fixtures_path();
    vec![
        "--from".to_string(),
        fixtures.join("lib").display().to_string(),
        "--exclude-from".to_string(),
        fixtures.join("lib/internal").display().to_string(),
        "--to".to_string(),
        fixtures.join("app").display().to_string(),
    ]
}

// ============================================================================
// Usage
// ============================================================================

#[test]
fn test_no_roots_prints_usage() {
    refaudit()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--exclude-from"))
        .stdout(predicate::str::contains("\"Exported\"").not());
}

#[test]
fn test_help_succeeds() {
    refaudit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--from"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    refaudit().arg("--bogus").assert().code(1);
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn test_json_report() {
    let output = refaudit().args(fixture_args()).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value["UnusedExports"],
        serde_json::json!([
            "example.com/lib/dummy.ExportedStruct",
            "example.com/lib/dummy.ExportedVariable"
        ])
    );
    assert_eq!(value["Exported"].as_array().unwrap().len(), 4);
    assert_eq!(value["Imported"].as_array().unwrap().len(), 3);
}

#[test]
fn test_logs_go_to_stderr() {
    refaudit()
        .args(fixture_args())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("--from:"));
}

#[test]
fn test_quiet_suppresses_logs() {
    refaudit()
        .args(fixture_args())
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_terminal_report() {
    refaudit()
        .args(fixture_args())
        .args(["--format", "terminal"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 potentially unused exports"))
        .stdout(predicate::str::contains("example.com/lib/dummy"));
}

#[test]
fn test_output_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unused.json");

    refaudit()
        .args(fixture_args())
        .arg("--output")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"UnusedExports\""));
    assert!(written.ends_with("}\n"));
}

#[test]
fn test_config_file_supplies_roots() {
    let dir = tempdir().unwrap();
    let fixtures = fixtures_path();
    let config = format!(
        "from = [{:?}]\nexclude_from = [{:?}]\nto = [{:?}]\n",
        fixtures.join("lib").display().to_string(),
        fixtures.join("lib/internal").display().to_string(),
        fixtures.join("app").display().to_string(),
    );
    fs::write(dir.path().join(".refaudit.toml"), config).unwrap();

    let output = refaudit().current_dir(dir.path()).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["UnusedExports"].as_array().unwrap().len(), 2);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_parse_failure_exits_with_two() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), "module example.com/broken\n").unwrap();
    fs::write(dir.path().join("broken.go"), "package broken\n\nfunc (\n").unwrap();

    refaudit()
        .arg("--from")
        .arg(dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("parse"));
}

#[test]
fn test_missing_root_exits_with_two() {
    refaudit()
        .arg("--to")
        .arg(fixtures_path().join("no-such-dir"))
        .assert()
        .code(2);
}

#[test]
fn test_invalid_config_exits_with_two() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "from = [[[").unwrap();

    refaudit().arg("--config").arg(&path).assert().code(2);
}
