//! Integration tests for `confres sample` and `confres check`

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_confres(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_confres"))
        .current_dir(dir)
        .env("HOME", dir)
        .args(args)
        .output()
        .expect("Failed to execute confres")
}

fn manifest_path(dir: &Path, body: &str) -> String {
    let path = dir.join("manifest.toml");
    fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_sample_lists_required_and_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = manifest_path(
        dir.path(),
        r#"
[[groups]]
path = "server"
description = "HTTP listener"

[[groups.properties]]
name = "port"
type = "integer"
default = 8080
description = "Listen port"

[[groups.properties]]
name = "host"
required = true
"#,
    );

    let output = run_confres(dir.path(), &["sample", "--manifest", &manifest]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# Expected properties file format (key=value)"));
    assert!(stdout.contains("# [server] HTTP listener"));
    assert!(stdout.contains("# Listen port"));
    assert!(stdout.contains("#server.port=8080"));
    assert!(stdout.contains("\nserver.host=\n"));
}

#[test]
fn test_check_reports_naming_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = manifest_path(
        dir.path(),
        r#"
[[groups]]

[[groups.properties]]
name = "Bob"

[[groups.properties]]
name = "bOB"
"#,
    );

    let output = run_confres(dir.path(), &["check", "--manifest", &manifest]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[NAMING_CONFLICT]"));
    assert!(stderr.contains("BOB"));
}

#[test]
fn test_check_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = manifest_path(
        dir.path(),
        r#"
[naming]
policy = "relaxed"

[[loaders]]
kind = "environment"
prefix = "APP_"

[[loaders]]
kind = "directory"
root = "/run/config"

[[groups]]
[[groups.properties]]
name = "TIMEOUT"
type = "duration"
default = "30s"
"#,
    );

    let output = run_confres(dir.path(), &["check", "--json", "--manifest", &manifest]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    assert_eq!(json["properties"], 1);
    assert_eq!(json["policy"], "relaxed");
    assert_eq!(json["loaders"][0], "environment(APP_*)");
    assert_eq!(json["loaders"][1], "directory(/run/config)");
    assert!(json["problems"].as_array().unwrap().is_empty());
}

#[test]
fn test_invalid_manifest_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = manifest_path(
        dir.path(),
        "[[groups]]\n[[groups.properties]]\nname = \"x\"\ntype = \"colour\"\n",
    );

    let output = run_confres(dir.path(), &["check", "--manifest", &manifest]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown type 'colour'"));
}
