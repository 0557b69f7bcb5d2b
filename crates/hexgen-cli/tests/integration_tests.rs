//! End-to-end tests for the `hexgen` binary.

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `hexgen` invocation isolated from the user's config and environment.
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

fn project() -> TempDir {
    TempDir::new().unwrap()
}

fn read(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap_or_else(|e| panic!("{rel}: {e}"))
}

#[test]
fn help_lists_generators() {
    let dir = project();
    hexgen(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("entity"))
        .stdout(predicate::str::contains("command"))
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("controller"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn no_color_env_accepts_any_non_empty_value() {
    let dir = project();
    for value in ["1", "yes", "true"] {
        hexgen(dir.path())
            .env("NO_COLOR", value)
            .args(["props", "a:int"])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 property"));
    }

    // Falsey values leave colour on.
    hexgen(dir.path())
        .env("NO_COLOR", "false")
        .args(["props", "a:int"])
        .assert()
        .success();
}

#[test]
fn version_flag() {
    let dir = project();
    hexgen(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn props_lists_parsed_properties() {
    let dir = project();
    hexgen(dir.path())
        .args(["props", "title:string(3,80):unique, price:decimal(0,99999.99):nullable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 properties"))
        .stdout(predicate::str::contains("title"))
        .stdout(predicate::str::contains("unique"))
        .stdout(predicate::str::contains("nullable"));
}

#[test]
fn props_json_output() {
    let dir = project();
    let out = hexgen(dir.path())
        .args(["--output-format", "json", "props", "email:string:unique"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value[0]["name"], "email");
    assert_eq!(value[0]["flags"]["unique"], true);
}

#[test]
fn classify_json_reports_intent_and_entities() {
    let dir = project();
    let out = hexgen(dir.path())
        .args(["--output-format", "json", "classify", "CreateInvoice"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["name"], "CreateInvoice");
    assert_eq!(value["intent"], "create");
    assert_eq!(value["inferred_entities"][0], "Invoice");
}

#[test]
fn entity_generation_writes_sources() {
    let dir = project();
    hexgen(dir.path())
        .args(["-C"])
        .arg(dir.path())
        .args(["entity", "Billing", "Invoice", "-p", "number:string(1,32):unique"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created"));

    let entity = read(dir.path(), "src/Billing/Domain/Entity/Invoice.php");
    assert!(entity.contains("namespace App\\Billing\\Domain\\Entity;"));
    assert!(entity.contains("$number"));

    let repo = read(dir.path(), "src/Billing/Domain/Repository/InvoiceRepositoryInterface.php");
    assert!(repo.contains("findOneByNumber"));

    assert!(dir.path().join("src/Billing/Infrastructure/Persistence/InvoiceRepository.php").exists());
    // Registration is opt-in.
    assert!(!dir.path().join("config/services.yaml").exists());
}

#[test]
fn register_flag_writes_registries() {
    let dir = project();
    hexgen(dir.path())
        .args(["entity", "Billing", "Invoice", "--register"])
        .assert()
        .success();

    let services = read(dir.path(), "config/services.yaml");
    assert!(services.contains("InvoiceRepositoryInterface"));
    let doctrine = read(dir.path(), "config/packages/doctrine.yaml");
    assert!(doctrine.contains("Billing"));
}

#[test]
fn registering_twice_leaves_registries_unchanged() {
    let dir = project();
    hexgen(dir.path())
        .args(["entity", "Billing", "Invoice", "--register"])
        .assert()
        .success();
    let first = read(dir.path(), "config/services.yaml");

    hexgen(dir.path())
        .args(["entity", "Billing", "Invoice", "--register", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already registered"));

    assert_eq!(read(dir.path(), "config/services.yaml"), first);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = project();
    hexgen(dir.path())
        .args(["command", "Billing", "CreateInvoice", "--register", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would write"));

    assert!(!dir.path().join("src").exists());
    assert!(!dir.path().join("config").exists());
}

#[test]
fn query_handler_injects_explicit_entity_repository() {
    let dir = project();
    hexgen(dir.path())
        .args(["query", "Billing", "GetInvoice", "-e", "Invoice"])
        .assert()
        .success();

    let handler = read(dir.path(), "src/Billing/Application/Query/GetInvoice/GetInvoiceHandler.php");
    assert!(handler.contains("InvoiceRepositoryInterface"));
}

#[test]
fn doctor_fails_until_module_is_registered() {
    let dir = project();
    hexgen(dir.path())
        .args(["doctor", "Billing"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("[FAIL]"));

    for args in [
        ["entity", "Billing", "Invoice"],
        ["command", "Billing", "CreateInvoice"],
        ["query", "Billing", "GetInvoice"],
        ["controller", "Billing", "Invoice"],
    ] {
        hexgen(dir.path()).args(args).arg("--register").assert().success();
    }

    hexgen(dir.path())
        .args(["doctor", "Billing", "--entity", "Invoice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[FAIL]").not());
}

#[test]
fn init_writes_local_config() {
    let dir = project();
    hexgen(dir.path()).arg("init").assert().success();

    let text = read(dir.path(), "hexgen.toml");
    assert!(text.contains("[registries]"));
    assert!(text.contains("config/services.yaml"));

    // The written file is picked up by later invocations.
    hexgen(dir.path())
        .args(["config", "get", "project.namespace"])
        .assert()
        .success()
        .stdout("App\n");
}

#[test]
fn config_file_changes_layout() {
    let dir = project();
    fs::write(
        dir.path().join("hexgen.toml"),
        "[project]\nnamespace = \"Acme\"\nsource_dir = \"lib\"\n",
    )
    .unwrap();

    hexgen(dir.path())
        .args(["entity", "Shop", "Product"])
        .assert()
        .success();

    let entity = read(dir.path(), "lib/Shop/Domain/Entity/Product.php");
    assert!(entity.contains("namespace Acme\\Shop\\Domain\\Entity;"));
}

#[test]
fn environment_overrides_config() {
    let dir = project();
    hexgen(dir.path())
        .env("HEXGEN_GENERATION__COMMAND_BUS", "messenger.bus.commands")
        .args(["config", "get", "generation.command_bus"])
        .assert()
        .success()
        .stdout("messenger.bus.commands\n");
}

#[test]
fn completions_for_bash() {
    let dir = project();
    hexgen(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hexgen"));
}
