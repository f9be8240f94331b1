//! # tar-external Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`archive.rs`, `cli.rs`,
//! `main_tests.rs`). Each `.rs` file in `cli/tests/` is its own test crate and
//! pulls this in with `mod common;`.
//!
//! Tests that drive the real archiver need `tar` and `gzip` on `PATH`, the
//! same way the unit tests assume `sh` and `ls`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::io;
use tar_external::{CommandRunner, Invocation, SystemRunner};
use tempfile::TempDir;

/// Names of the fixture files created by `fixture_dir`, in sorted order.
pub const TMP_FILES: [&str; 3] = ["temp1.txt", "temp2.txt", "temp3.txt"];

/// # Get tarx Command (`tarx_cmd`)
///
/// An `assert_cmd::Command` for the compiled `tarx` binary.
///
/// ## Panics
/// Panics if the `tarx` binary cannot be found via `Command::cargo_bin`.
pub fn tarx_cmd() -> Command {
    Command::cargo_bin("tarx").expect("Failed to find tarx binary for testing")
}

/// # Isolated tarx Command (`tarx_in`)
///
/// A `tarx` command running in `dir`, with no user or project configuration
/// and no `TARX_*` overrides leaking in from the environment.
pub fn tarx_in(dir: &TempDir) -> Command {
    let mut cmd = tarx_cmd();
    cmd.current_dir(dir.path())
        .env("TARX_CONFIG", dir.path().join("no-such-config.toml"))
        .env_remove("TARX_TAR_PROGRAM")
        .env_remove("TARX_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

/// # Fixture Directory (`fixture_dir`)
///
/// A temporary directory holding `temp1.txt`..`temp3.txt` and an empty `.git`
/// directory, so project configuration search stops here.
pub fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for name in TMP_FILES {
        fs::write(dir.path().join(name), "This is a temporary text file\n")
            .expect("Failed to write fixture file");
    }
    fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
    dir
}

/// # Program Availability (`program_available`)
///
/// Whether `program` can be launched at all. Mirrors the dependency check used
/// by setup tooling: only a `NotFound` launch error counts as missing.
pub fn program_available(program: &str) -> bool {
    match SystemRunner.run(&Invocation::new(program, ["--help"])) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}

/// Regular-file member names of an uncompressed tar stream, read with the
/// `tar` crate rather than the external program.
pub fn member_names<R: io::Read>(reader: R) -> Vec<String> {
    let mut archive = tar::Archive::new(reader);
    archive
        .entries()
        .expect("Failed to read archive entries")
        .map(|entry| entry.expect("Failed to read archive entry"))
        .filter(|entry| entry.header().entry_type().is_file())
        .map(|entry| {
            entry
                .path()
                .expect("Entry has no path")
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}
