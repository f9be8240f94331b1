//! # tarx Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Verifies the top-level behavior of the `tarx` binary: `--help`,
//! `--version`, the `help` subcommand, and argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_flag() {
    tarx_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("create")
                .and(predicate::str::contains("list"))
                .and(predicate::str::contains("decompress")),
        );
}

#[test]
fn test_version_flag() {
    tarx_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_subcommand() {
    tarx_cmd()
        .args(["help", "extract"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--to"));
}

#[test]
fn test_missing_subcommand() {
    tarx_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_add_requires_files() {
    tarx_cmd()
        .args(["add", "test.tar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
