//! CLI integration tests
//!
//! These tests verify the CLI commands work correctly by running the binary.

#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::Command;

fn woden_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_woden"))
}

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().to_string()
}

// ============================================================================
// Validate Command Tests
// ============================================================================

#[test]
fn test_cli_validate_valid() {
    let output = Command::new(woden_bin())
        .args(["validate", &fixture("greeter.wsdl")])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Target Namespace: http://example.com/greeter"));
    assert!(stdout.contains("Interfaces: 1"));
    assert!(stdout.contains("Description is valid"));
}

#[test]
fn test_cli_validate_invalid() {
    let output = Command::new(woden_bin())
        .args(["validate", &fixture("broken.wsdl")])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Interface-1010"));
    assert!(stdout.contains("mailto:foo"));
    assert!(stdout.contains("Description is invalid (4 errors, 0 warnings)"));
}

#[test]
fn test_cli_validate_json() {
    let output = Command::new(woden_bin())
        .args(["validate", "--json", &fixture("broken.wsdl")])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");

    assert_eq!(json["valid"], false);
    assert_eq!(json["targetNamespace"], "http://example.com/broken");
    assert_eq!(json["report"]["errors"], 4);

    let diagnostics = json["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 4);
    assert_eq!(diagnostics[2]["id"], "Endpoint-1061");
    assert_eq!(diagnostics[2]["severity"], "error");
    assert_eq!(diagnostics[2]["args"][0], "mailto:foo");
}

#[test]
fn test_cli_validate_with_catalog() {
    let output = Command::new(woden_bin())
        .args([
            "validate",
            "--catalog",
            &fixture("catalog.xml"),
            "--json",
            &fixture("greeter-catalog.wsdl"),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], true);
}

#[test]
fn test_cli_no_validation() {
    let output = Command::new(woden_bin())
        .args(["validate", "--no-validation", &fixture("broken.wsdl")])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Validation skipped"));
}

#[test]
fn test_cli_missing_file() {
    let output = Command::new(woden_bin())
        .args(["validate", &fixture("missing.wsdl")])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(woden_bin())
        .args(["--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validate"));
}
