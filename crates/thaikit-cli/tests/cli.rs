use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn thaikit() -> Command {
    let mut cmd = Command::cargo_bin("thaikit").unwrap();
    cmd.env_remove("THAIKIT_TEMPLATE_DIR");
    cmd
}

fn kit_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates/ui-kit")
}

#[test]
fn test_help_flag_prints_usage() {
    thaikit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_no_arguments_prints_usage() {
    thaikit()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_help_and_unknown_commands_print_usage() {
    for token in ["help", "frobnicate"] {
        thaikit()
            .arg(token)
            .assert()
            .success()
            .stdout(predicate::str::contains("init"));
    }
}

#[test]
fn test_version_flag() {
    thaikit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_init_with_defaults_scaffolds_project() {
    let project = tempfile::tempdir().unwrap();

    thaikit()
        .args(["init", "--yes", "--skip-install", "-C"])
        .arg(project.path())
        .arg("--template-dir")
        .arg(kit_root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Next steps"));

    let src = project.path().join("src");
    assert!(src.join("components/index.ts").is_file());
    assert!(src.join("utils/cn.ts").is_file());
    assert!(project.path().join("tsconfig.json").is_file());
    assert!(!project.path().join("node_modules").exists());
}

#[test]
fn test_template_dir_from_environment() {
    let project = tempfile::tempdir().unwrap();

    thaikit()
        .env("THAIKIT_TEMPLATE_DIR", kit_root())
        .args(["init", "--yes", "--skip-install", "-C"])
        .arg(project.path())
        .assert()
        .success();

    assert!(project.path().join("src/components/index.ts").is_file());
}

#[test]
fn test_missing_kit_fails_before_writing() {
    let project = tempfile::tempdir().unwrap();
    let missing = project.path().join("no-kit");

    thaikit()
        .args(["init", "--yes", "--skip-install", "-C"])
        .arg(project.path())
        .arg("--template-dir")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Component sources not found"));

    assert!(!project.path().join("src").exists());
}
