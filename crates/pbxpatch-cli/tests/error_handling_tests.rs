//! Tests for error reporting and exit codes.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("../../pbxpatch-core/tests/fixtures/project.pbxproj");

fn pbxpatch(dir: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("pbxpatch");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_missing_manifest_exits_3() {
    let temp = TempDir::new().unwrap();

    pbxpatch(temp.path())
        .args(["apply", "nowhere/project.pbxproj"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Manifest not found"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_strict_with_missing_anchor_exits_5() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("project.pbxproj");
    let without_sources = FIXTURE.replace("/* Sources */ = {", "/* Compile */ = {");
    fs::write(&manifest, &without_sources).unwrap();

    pbxpatch(temp.path())
        .args(["apply", "project.pbxproj", "--strict"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Patch incomplete"))
        .stderr(predicate::str::contains("--strict"));

    assert_eq!(fs::read_to_string(&manifest).unwrap(), without_sources);
}

#[test]
fn test_malformed_identifier_exits_2() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("project.pbxproj"), FIXTURE).unwrap();

    pbxpatch(temp.path())
        .args(["apply", "project.pbxproj", "--parent-id", "XYZ"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid object identifier"));
}

#[test]
fn test_unknown_flag_exits_2() {
    let temp = TempDir::new().unwrap();

    pbxpatch(temp.path())
        .args(["apply", "--lang", "rust"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_config_file_exits_4() {
    let temp = TempDir::new().unwrap();

    pbxpatch(temp.path())
        .args(["--config", "absent.toml", "config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_init_twice_needs_force() {
    let temp = TempDir::new().unwrap();

    pbxpatch(temp.path()).arg("init").assert().success();
    pbxpatch(temp.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
    pbxpatch(temp.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_unknown_config_key_exits_2() {
    let temp = TempDir::new().unwrap();

    pbxpatch(temp.path())
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_verbose_error_omits_hint() {
    let temp = TempDir::new().unwrap();

    pbxpatch(temp.path())
        .args(["-v", "apply", "missing.pbxproj"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
