//! Integration tests for `confres resolve`
//!
//! These tests run the compiled binary against manifests written to a
//! temporary directory and check both output formats and the failure report.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const MANIFEST: &str = r#"
[[loaders]]
kind = "command-line"

[[loaders]]
kind = "fixed"
label = "site-defaults"
values = { TIMEOUT = 60 }

[[groups]]

[[groups.properties]]
name = "TIMEOUT"
type = "integer"
default = 50

[[groups.properties]]
name = "SERVICE_URL"
required = true
validators = [{ rule = "ends-with", value = "/" }]

[[groups.properties]]
name = "API_TOKEN"
secret = true
default = "local-dev-token"
"#;

fn write_manifest(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("manifest.toml");
    fs::write(&path, body).expect("write manifest");
    path
}

fn run_confres(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_confres"))
        .current_dir(dir)
        .env("HOME", dir)
        .args(args)
        .output()
        .expect("Failed to execute confres")
}

#[test]
fn test_resolve_json_success() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), MANIFEST);

    let output = run_confres(
        dir.path(),
        &[
            "resolve",
            "--json",
            "--manifest",
            manifest.to_str().unwrap(),
            "--",
            "--service_url=http://x.com/",
        ],
    );

    assert!(
        output.status.success(),
        "resolve failed with exit code {:?}. stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");

    assert_eq!(json["SERVICE_URL"]["value"], "http://x.com/");
    assert_eq!(json["SERVICE_URL"]["origin"]["source"], "command-line");
    assert_eq!(json["TIMEOUT"]["value"], 60);
    assert_eq!(json["TIMEOUT"]["origin"]["source"], "site-defaults");
    assert_eq!(json["API_TOKEN"]["value"], "******");
    assert!(!stdout.contains("local-dev-token"));
}

#[test]
fn test_resolve_table_output() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), MANIFEST);

    let output = run_confres(
        dir.path(),
        &[
            "resolve",
            "--manifest",
            manifest.to_str().unwrap(),
            "--",
            "SERVICE_URL=http://x.com/",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Property"));
    assert!(stdout.contains("SERVICE_URL"));
    assert!(stdout.contains("site-defaults"));
}

#[test]
fn test_resolve_failure_reports_every_problem() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), MANIFEST);

    let output = run_confres(
        dir.path(),
        &[
            "resolve",
            "--manifest",
            manifest.to_str().unwrap(),
            "--",
            "--service_url=http://x.com",
            "--timeout=soon",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration resolution failed with 2 problems"));
    assert!(stderr.contains("[CONVERSION_FAILURE]"));
    assert!(stderr.contains("[VALIDATION_FAILURE]"));
    assert!(stderr.contains("# Expected properties file format (key=value)"));
}

#[test]
fn test_resolve_failure_json_lists_problems() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), MANIFEST);

    let output = run_confres(
        dir.path(),
        &["resolve", "--json", "--manifest", manifest.to_str().unwrap()],
    );

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    let problems = json["problems"].as_array().expect("problems array");

    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0]["kind"], "MISSING_REQUIRED_VALUE");
    assert_eq!(problems[0]["property"], "SERVICE_URL");
}

#[test]
fn test_resolve_uses_project_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join(".confres");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("manifest.toml"), MANIFEST).unwrap();

    let output = run_confres(
        dir.path(),
        &["resolve", "--json", "--", "--service_url=http://x.com/"],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_resolve_without_manifest_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_confres(dir.path(), &["resolve"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No manifest found"));
}
