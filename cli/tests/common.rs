//! # cfnkit CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and builds its commands through `cfnkit_cmd()`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates an `assert_cmd::Command` for the compiled `cfnkit` binary.
///
/// The command runs inside `workdir` with `CFNKIT_CONFIG` pointing at an empty
/// file there, so a project `.cfnkit.toml` elsewhere on the machine cannot
/// leak into the test.
pub fn cfnkit_cmd(workdir: &Path) -> Command {
    let config = workdir.join("cfnkit-test.toml");
    if !config.exists() {
        fs::write(&config, "").expect("Failed to write empty test config");
    }
    let mut cmd = Command::cargo_bin("cfnkit").expect("Failed to find cfnkit binary for testing");
    cmd.current_dir(workdir).env("CFNKIT_CONFIG", config);
    cmd
}

/// Writes `content` to `workdir/name` and returns the path.
pub fn write_file(workdir: &Path, name: &str, content: &str) -> PathBuf {
    let path = workdir.join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

pub const QUEUE_TEMPLATE: &str = r#"{
  "Resources": {
    "MyQueue": { "Type": "AWS::SQS::Queue", "Properties": { "QueueName": "jobs" } },
    "Role": { "Type": "AWS::IAM::Role", "Properties": {} }
  },
  "Outputs": { "QueueUrl": { "Value": { "Ref": "MyQueue" } } }
}"#;

pub const BUCKET_TEMPLATE: &str = r#"{
  "Resources": {
    "Site": { "Type": "AWS::S3::Bucket", "Properties": {} },
    "Handler": { "Type": "AWS::Lambda::Function", "Properties": { "Runtime": "provided.al2" } }
  },
  "Mappings": { "Stages": { "dev": { "Memory": 128 } } }
}"#;
