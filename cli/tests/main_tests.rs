//! # cfnkit CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behavior of the `cfnkit` binary: `--help`, `--version`, and
//! argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_main_help_flag() {
    let dir = tempdir().unwrap();
    cfnkit_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge").and(predicate::str::contains("discover")));
}

#[test]
fn test_main_version_flag() {
    let dir = tempdir().unwrap();
    cfnkit_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_fails() {
    let dir = tempdir().unwrap();
    cfnkit_cmd(dir.path()).assert().failure();
}

#[test]
fn test_invalid_config_reported() {
    let dir = tempdir().unwrap();
    let template = write_file(dir.path(), "queue.json", QUEUE_TEMPLATE);
    let bad_config = write_file(
        dir.path(),
        "bad.toml",
        "[discovery.attributes]\n\"Lambda\" = [\"Arn\"]\n",
    );

    cfnkit_cmd(dir.path())
        .env("CFNKIT_CONFIG", &bad_config)
        .arg("outputs")
        .arg(&template)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid resource type"));
}
