//! # tarx Command-Line Integration Tests
//!
//! File: cli/tests/cli.rs
//!
//! ## Overview
//!
//! End-to-end runs of the `tarx` binary in isolated temporary directories,
//! checking stdout, stderr and exit status for each subcommand.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs::{self, File};

const LISTING: &str = "temp1.txt\ntemp2.txt\ntemp3.txt\n";

#[test]
fn test_create_and_list() {
    let dir = fixture_dir();
    tarx_in(&dir)
        .args(["create", "test.tar", "*.txt"])
        .assert()
        .success()
        .stdout("test.tar\n");

    tarx_in(&dir)
        .args(["list", "test.tar"])
        .assert()
        .success()
        .stdout(LISTING);

    // `t` and `info` are aliases for `list`.
    tarx_in(&dir)
        .args(["info", "test.tar"])
        .assert()
        .success()
        .stdout(LISTING);
}

#[test]
fn test_create_with_compress_prints_compressed_name() {
    let dir = fixture_dir();
    tarx_in(&dir)
        .args(["create", "test.tar", "*.txt", "--compress"])
        .assert()
        .success()
        .stdout("test.tar.gz\n");

    let gz = File::open(dir.path().join("test.tar.gz")).unwrap();
    assert_eq!(member_names(flate2::read::GzDecoder::new(gz)), TMP_FILES);
    assert!(!dir.path().join("test.tar").exists());
}

#[test]
fn test_compress_then_decompress() {
    let dir = fixture_dir();
    tarx_in(&dir)
        .args(["create", "test.tar", "temp1.txt"])
        .assert()
        .success();
    tarx_in(&dir)
        .args(["compress", "test.tar"])
        .assert()
        .success()
        .stdout("test.tar.gz\n");
    tarx_in(&dir)
        .args(["decompress", "test.tar.gz"])
        .assert()
        .success()
        .stdout("test.tar\n");

    assert!(dir.path().join("test.tar").is_file());
    assert!(!dir.path().join("test.tar.gz").exists());
}

#[test]
fn test_add_update_and_extract() {
    let dir = fixture_dir();
    tarx_in(&dir)
        .args(["add", "test.tar", "temp1.txt", "temp2.txt"])
        .assert()
        .success();
    tarx_in(&dir)
        .args(["update", "test.tar", "temp3.txt"])
        .assert()
        .success();
    tarx_in(&dir)
        .args(["list", "test.tar"])
        .assert()
        .success()
        .stdout(LISTING);

    tarx_in(&dir)
        .args(["extract", "test.tar", "temp2.txt", "--to", "out"])
        .assert()
        .success();
    assert!(dir.path().join("out/temp2.txt").is_file());
    assert!(!dir.path().join("out/temp1.txt").exists());
}

#[test]
fn test_directory_flag() {
    let dir = fixture_dir();
    let outside = tempfile::tempdir().unwrap();
    tarx_in(&outside)
        .arg("-C")
        .arg(dir.path())
        .args(["create", "test.tar", "*.txt"])
        .assert()
        .success();

    assert!(dir.path().join("test.tar").is_file());
    assert!(!outside.path().join("test.tar").exists());
}

#[test]
fn test_extract_missing_member_fails() {
    let dir = fixture_dir();
    tarx_in(&dir)
        .args(["create", "test.tar", "*.txt"])
        .assert()
        .success();
    tarx_in(&dir)
        .args(["extract", "test.tar", "blah.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_list_missing_archive_fails() {
    let dir = fixture_dir();
    tarx_in(&dir)
        .args(["list", "missing.tar"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_invalid_options_are_rejected() {
    let dir = fixture_dir();
    tarx_in(&dir)
        .args(["create", "test.tar", "*.txt", "-o", "c-f"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid options format: c-f"));
    assert!(!dir.path().join("test.tar").exists());
}

#[test]
fn test_invalid_format_flag() {
    let dir = fixture_dir();
    tarx_in(&dir)
        .args(["--format", "zip", "list", "test.tar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported archive format 'zip'"));
}

#[test]
fn test_format_from_environment() {
    let dir = fixture_dir();
    tarx_in(&dir)
        .env("TARX_FORMAT", "bogus")
        .args(["list", "test.tar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported archive format 'bogus'"));
}

#[test]
fn test_project_config_selects_compressor() {
    let dir = fixture_dir();
    // A compressor that does nothing, so no compressed file appears.
    fs::write(
        dir.path().join(".tarx.toml"),
        "[tools]\ncompress_program = \"true\"\n",
    )
    .unwrap();
    tarx_in(&dir)
        .args(["create", "test.tar", "*.txt", "--compress"])
        .assert()
        .success()
        .stdout("test.tar\n");
    assert!(dir.path().join("test.tar").is_file());
}

#[test]
fn test_missing_tar_program() {
    let dir = fixture_dir();
    tarx_in(&dir)
        .args(["--tar-program", "nonexistent_tarx_archiver_12345"])
        .args(["list", "test.tar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to run 'nonexistent_tarx_archiver_12345'",
        ));
}
