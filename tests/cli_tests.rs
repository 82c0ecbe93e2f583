//! CLI integration tests using the REAL wasmpak binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn wasmpak_cmd() -> Command {
    let mut cmd = Command::cargo_bin("wasmpak").unwrap();
    // Ignore any developer overrides during tests
    cmd.env_remove("WASMPAK_PROJECT");
    cmd.env_remove("WASMPAK_CONFIG");
    cmd.env_remove("WASMPAK_LOG");
    cmd
}

#[test]
fn test_help_output() {
    wasmpak_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("--project"));
}

#[test]
fn test_build_help_lists_modes() {
    wasmpak_cmd()
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("development"))
        .stdout(predicate::str::contains("production"))
        .stdout(predicate::str::contains("--out-dir"));
}

#[test]
fn test_version_output() {
    wasmpak_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wasmpak"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_version_flag() {
    wasmpak_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_command() {
    wasmpak_cmd()
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_invalid_mode() {
    wasmpak_cmd()
        .args(["build", "--mode", "fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_completions_bash() {
    wasmpak_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wasmpak"));
}

#[test]
fn test_completions_zsh() {
    wasmpak_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef wasmpak"));
}

#[test]
fn test_completions_unknown_shell() {
    wasmpak_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure();
}

#[test]
fn test_inspect_missing_file() {
    wasmpak_cmd()
        .args(["inspect", "/nonexistent/module.wasm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: File not found"));
}

#[test]
fn test_inspect_invalid_module() {
    let project = common::TestProject::new();
    project.write_file("broken.wasm", "not a module");

    wasmpak_cmd()
        .arg("inspect")
        .arg(project.path.join("broken.wasm"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid WebAssembly module"));
}

#[test]
fn test_inspect_empty_module_json() {
    let project = common::TestProject::new();
    std::fs::write(project.path.join("empty.wasm"), b"\0asm\x01\0\0\0").unwrap();

    wasmpak_cmd()
        .args(["inspect", "--json"])
        .arg(project.path.join("empty.wasm"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"exports\": []"));
}
