// tests/cli_integration_test.rs
use std::fs;
use std::process::Command;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_openapi-info-sync"))
}

#[test]
fn test_help() {
    let output = binary().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("openapi-info-sync"));
    assert!(stdout.contains("--override"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_version() {
    let output = binary().arg("--version").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_override_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = binary()
        .current_dir(dir.path())
        .args(["--yes", "--override", "summary"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("summary"));
}

#[test]
fn test_unreadable_document_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let document = dir.path().join("openapi.yaml");
    let broken = "openapi: 3.1.0\ninfo: [unterminated\n";
    fs::write(&document, broken).unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "petstore", "version": "2.0.0"}"#,
    )
    .unwrap();

    let output = binary()
        .current_dir(dir.path())
        .args(["--yes", "--license", ""])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_to_string(&document).unwrap(), broken);
}

#[test]
fn test_offline_run_without_license() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "petstore", "description": "Pets", "version": "2.0.0", "author": "Jane Doe <jane@example.com>"}"#,
    )
    .unwrap();

    // an empty license skips the SPDX download entirely
    let output = binary()
        .current_dir(dir.path())
        .args(["--yes", "--license", ""])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let written = fs::read_to_string(dir.path().join("openapi.yaml")).unwrap();
    assert!(written.starts_with("openapi: 3.1.0\n"));
    assert!(written.contains("  title: petstore\n"));
    assert!(written.contains("  version: 2.0.0\n"));
    assert!(written.contains("    email: jane@example.com\n"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("package.json"), r#"{"name": "petstore"}"#).unwrap();

    let output = binary()
        .current_dir(dir.path())
        .args(["--yes", "--dry-run", "--license", "", "--api-version", "1.0.0"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("title: petstore"));
    assert!(!dir.path().join("openapi.yaml").exists());
}
