//! Tests for error messages, suggestions and exit codes.

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn hexgen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hexgen").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_unknown_property_type_is_user_error() {
    let dir = TempDir::new().unwrap();
    hexgen(dir.path())
        .args(["props", "title:varchar"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown type 'varchar'"));
}

#[test]
fn test_inverted_bounds_are_rejected() {
    let dir = TempDir::new().unwrap();
    hexgen(dir.path())
        .args(["props", "age:int(10,1)"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("greater than max"));
}

#[test]
fn test_bad_property_spec_writes_nothing() {
    let dir = TempDir::new().unwrap();
    hexgen(dir.path())
        .args(["entity", "Billing", "Invoice", "-p", "title:string(3"])
        .assert()
        .code(2);

    assert!(!dir.path().join("src").exists());
}

#[test]
fn test_invalid_module_name() {
    let dir = TempDir::new().unwrap();
    hexgen(dir.path())
        .args(["entity", "bad-module", "Invoice"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid module name"));
}

#[test]
fn test_existing_file_needs_force() {
    let dir = TempDir::new().unwrap();
    hexgen(dir.path())
        .args(["entity", "Billing", "Invoice"])
        .assert()
        .success();

    hexgen(dir.path())
        .args(["entity", "Billing", "Invoice"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Refusing to overwrite"))
        .stderr(predicate::str::contains("--force"));

    hexgen(dir.path())
        .args(["entity", "Billing", "Invoice", "--force"])
        .assert()
        .success();
}

#[test]
fn test_unconfigured_registry_suggests_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("hexgen.toml"),
        "[registries]\ntype_mapping = \"\"\n",
    )
    .unwrap();

    hexgen(dir.path())
        .args(["entity", "Billing", "Invoice", "--register"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("registry is configured"))
        .stderr(predicate::str::contains("hexgen.toml"));
}

#[test]
fn test_malformed_registry_is_left_untouched() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    let broken = "services: [unclosed\n";
    fs::write(dir.path().join("config/services.yaml"), broken).unwrap();

    hexgen(dir.path())
        .args(["entity", "Billing", "Invoice", "--register"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot parse"));

    let after = fs::read_to_string(dir.path().join("config/services.yaml")).unwrap();
    assert_eq!(after, broken);
}

#[test]
fn test_broken_config_file_exits_with_config_code() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hexgen.toml"), "[project\nnamespace = ").unwrap();

    hexgen(dir.path())
        .args(["props", "title:string"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_config_key() {
    let dir = TempDir::new().unwrap();
    hexgen(dir.path())
        .args(["config", "get", "project.nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_missing_project_root() {
    let dir = TempDir::new().unwrap();
    hexgen(dir.path())
        .args(["-C", "does/not/exist", "entity", "Billing", "Invoice"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let dir = TempDir::new().unwrap();
    hexgen(dir.path())
        .arg("scaffold")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_verbose_flag_hint_only_without_verbose() {
    let dir = TempDir::new().unwrap();
    hexgen(dir.path())
        .args(["props", "title:varchar"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--verbose"));

    hexgen(dir.path())
        .args(["-v", "props", "title:varchar"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown type"))
        .stderr(predicate::str::contains("Use -v").not());
}
