#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_xpdo-openapi-gen"));
    cmd.current_dir(dir)
        .env_remove("XPDO_OAS_SPEC")
        .env_remove("RUST_LOG")
        .env_remove("XPDO_OAS_LOG_LEVEL");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_build_updates_document() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("openapi.json");
    fs::copy(fixture("openapi.json"), &spec).unwrap();

    let output = cli(dir.path())
        .arg("build")
        .arg("--spec")
        .arg(&spec)
        .arg("--schema")
        .arg(fixture("modx.mysql.schema.xml"))
        .arg("--schema")
        .arg(fixture("modx.registry.db.mysql.schema.xml"))
        .output()
        .expect("run cli");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let out = stdout(&output);
    assert!(out.contains("Skipping model definition for modSession as it is on the ignore list"));
    assert!(out.contains("Wrote 18 schemas and 18 paths"));

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&spec).unwrap()).unwrap();
    assert!(doc["paths"].get("/context/{contextKey}/setting/{settingKey}").is_some());
    assert_eq!(doc["info"]["title"], "MODX Revolution REST API");
}

#[test]
fn test_cli_uses_config_file_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("spec")).unwrap();
    fs::copy(fixture("openapi.json"), dir.path().join("spec/openapi.json")).unwrap();
    fs::copy(fixture("modx.mysql.schema.xml"), dir.path().join("core.xml")).unwrap();
    fs::write(dir.path().join("xpdo-openapi.toml"), "schemas = [\"core.xml\"]\n").unwrap();

    // no subcommand runs `build`
    let output = cli(dir.path()).output().expect("run cli");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("Wrote 14 schemas and 14 paths"));
}

#[test]
fn test_cli_dry_run() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("openapi.json");
    fs::copy(fixture("openapi.json"), &spec).unwrap();
    let before = fs::read_to_string(&spec).unwrap();

    let output = cli(dir.path())
        .args(["build", "--dry-run", "--spec"])
        .arg(&spec)
        .arg("--schema")
        .arg(fixture("modx.mysql.schema.xml"))
        .output()
        .expect("run cli");

    assert!(output.status.success());
    assert!(stdout(&output).contains("Dry run: would write 14 schemas and 14 paths"));
    assert_eq!(fs::read_to_string(&spec).unwrap(), before);
}

#[test]
fn test_cli_invalid_document_fails() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("openapi.json");
    fs::write(&spec, "{ not json").unwrap();

    let output = cli(dir.path())
        .arg("build")
        .arg("--spec")
        .arg(&spec)
        .arg("--schema")
        .arg(fixture("modx.mysql.schema.xml"))
        .output()
        .expect("run cli");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not load existing"), "stderr: {stderr}");
    // skip diagnostics are still reported before the failure
    assert!(stdout(&output).contains("Skipping model definition for modElement"));
    assert_eq!(fs::read_to_string(&spec).unwrap(), "{ not json");
}

#[test]
fn test_cli_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(dir.path())
        .args(["build", "--config", "nope.toml"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid build config"));
}

#[test]
fn test_cli_inspect() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(dir.path())
        .arg("inspect")
        .arg("--schema")
        .arg(fixture("modx.mysql.schema.xml"))
        .arg("--schema")
        .arg(fixture("modx.registry.db.mysql.schema.xml"))
        .output()
        .expect("run cli");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let out = stdout(&output);
    assert!(out.contains("modContext\tContext\t/context\toverride"));
    assert!(out.contains("\t/context/{contextKey}\n"));
    assert!(out.contains("modTemplateVar\tTemplate Var\t/template-var\tdefault"));
    assert!(out.contains("modSession\tSession\t/session\tskipped: ignored"));
    assert!(out.contains("modAccessibleObject\tAccessible Object\t/accessible-object\tskipped: no table"));
    assert!(out.contains(
        "registry.db.modDbRegisterQueue\tDb Register Queue\t/registry/db/db-register-queue\tdefault"
    ));
    assert!(!dir.path().join("spec").exists());
}
