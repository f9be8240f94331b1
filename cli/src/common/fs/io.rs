//! # tar-external Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` used by the archive handle and the
//! configuration loader.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: Creates a directory (and parents) unless it already
//!   exists; fails if the path exists but is not a directory. Used before
//!   extracting into a target directory.
//! - **`read_file_to_string`**: `fs::read_to_string` with the file name in the
//!   error context. Used by configuration loading.
//! - **`resolve_in`**: Joins a possibly-relative name onto the handle's working
//!   directory, so filesystem checks look where the external program ran.
//!
//! ## Usage
//!
//! ```rust
//! use tar_external::common::fs::io;
//! use std::path::Path;
//!
//! let path = io::resolve_in(Some(Path::new("/srv/backups")), "nightly.tar");
//! assert_eq!(path, Path::new("/srv/backups/nightly.tar"));
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist it is created, including missing parents
/// (like `mkdir -p`).
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creating
/// it fails (e.g. permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!("Path exists but is not a directory: {:?}", path);
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string, naming the file in the
/// error if reading fails.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Resolves `name` against `base`.
///
/// Absolute names and a `None` base return `name` unchanged.
pub fn resolve_in(base: Option<&Path>, name: &str) -> PathBuf {
    match base {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
