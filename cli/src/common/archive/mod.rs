//! # tar-external Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Everything that turns an archive operation into an external command lives
//! under this module. No archive or compression format is parsed here; the
//! `tar` and compressor programs do all of that work.
//!
//! ## Architecture
//!
//! - **`tar`**: The `TarExternal` handle (create, list, add, update, extract,
//!   compress, decompress) and the handle-free `extract_file`.
//! - **`compression`**: Running a compressor against one file, finding the
//!   compressed file it produced, and mapping compressed names back to archive
//!   names. Also hosts the handle-free `decompress_file`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tar_external::common::archive::{compression, tar};
//! use tar_external::common::process::SystemRunner;
//!
//! # fn main() -> Result<(), tar_external::TarError> {
//! compression::decompress_file(&SystemRunner, "release.tar.gz", None, None)?;
//! tar::extract_file(&SystemRunner, "tar", "release.tar", &["README"], None)?;
//! # Ok(())
//! # }
//! ```
//!

pub mod compression;
pub mod tar;

#[cfg(test)]
pub(crate) mod testing;
