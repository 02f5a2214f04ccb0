//! Integration tests for the `utf8config` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to drive the check, fmt, get
//! and json subcommands through the actual binary, including stdin/stdout
//! piping, file I/O and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn app_conf_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/app.conf")
}

fn app_conf() -> String {
    std::fs::read_to_string(app_conf_path()).expect("app.conf fixture must exist")
}

fn cli() -> Command {
    Command::cargo_bin("utf8config").unwrap()
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("utf8config-cli-{}-{}", std::process::id(), name))
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_reports_sections() {
    cli()
        .args(["check", "-i", app_conf_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 2 sections, 6 fields"))
        .stdout(predicate::str::contains("[DEFAULT] 3 fields"))
        .stdout(predicate::str::contains("[features] 3 fields"));
}

#[test]
fn check_reads_stdin() {
    cli()
        .arg("check")
        .write_stdin("[a]\nx = 1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 1 sections, 1 fields"));
}

#[test]
fn check_rejects_field_outside_section() {
    cli()
        .arg("check")
        .write_stdin("x = 1\n[a]\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("field outside of any section"));
}

#[test]
fn check_rejects_duplicate_key() {
    cli()
        .arg("check")
        .write_stdin("[a]\nx = 1\nx = 2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate key: x"));
}

#[test]
fn check_missing_file_fails() {
    cli()
        .args(["check", "-i", "/nonexistent/app.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// fmt
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fmt_normalizes_layout() {
    cli()
        .arg("fmt")
        .write_stdin(app_conf())
        .assert()
        .success()
        .stdout(predicate::str::contains("# DEFAULT是默认Section\n[DEFAULT]\n"))
        .stdout(predicate::str::contains("port = 8080 # 端口号\n"))
        .stdout(predicate::str::contains("names = alpha, beta\n"))
        .stdout(predicate::str::contains("zip = '02139'\n"));
}

#[test]
fn fmt_strip_comments() {
    cli()
        .args(["fmt", "--strip-comments", "-i", app_conf_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("#").not())
        .stdout(predicate::str::contains("[features]\nenabled = True\n"));
}

#[test]
fn fmt_output_is_stable() {
    let once = cli()
        .arg("fmt")
        .write_stdin(app_conf())
        .output()
        .unwrap();
    assert!(once.status.success());
    let once = String::from_utf8(once.stdout).unwrap();

    cli()
        .arg("fmt")
        .write_stdin(once.clone())
        .assert()
        .success()
        .stdout(once);
}

#[test]
fn fmt_file_to_file() {
    let output = temp_path("fmt.conf");
    let _ = std::fs::remove_file(&output);

    cli()
        .args(["fmt", "-i", app_conf_path(), "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("# DEFAULT是默认Section\n[DEFAULT]\n"));
    let _ = std::fs::remove_file(&output);
}

// ─────────────────────────────────────────────────────────────────────────────
// get
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn get_prints_encoded_value() {
    cli()
        .args(["get", "DEFAULT", "port", "-i", app_conf_path()])
        .assert()
        .success()
        .stdout("8080\n");

    cli()
        .args(["get", "features", "zip", "-i", app_conf_path()])
        .assert()
        .success()
        .stdout("'02139'\n");

    cli()
        .args(["get", "features", "names", "-i", app_conf_path()])
        .assert()
        .success()
        .stdout("alpha, beta\n");
}

#[test]
fn get_missing_key_fails() {
    cli()
        .args(["get", "DEFAULT", "nope", "-i", app_conf_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing key: nope"));
}

#[test]
fn get_missing_section_fails() {
    cli()
        .args(["get", "NOPE", "port", "-i", app_conf_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing section: NOPE"));
}

// ─────────────────────────────────────────────────────────────────────────────
// json
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn json_exports_values() {
    let output = cli()
        .args(["json", "-i", app_conf_path()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "DEFAULT": {
                "localhost": "192.168.0.1",
                "port": 8080,
                "connection_timeout": 60
            },
            "features": {
                "enabled": true,
                "names": ["alpha", "beta"],
                "zip": "02139"
            }
        })
    );
}

#[test]
fn json_rejects_invalid_input() {
    cli()
        .arg("json")
        .write_stdin("[a]\nbad = 1, 2.5\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Type mismatch"));
}
