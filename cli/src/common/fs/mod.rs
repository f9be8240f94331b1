//! # tar-external Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! The archive handle mostly leaves the filesystem to the external programs.
//! The few places it does look at files itself are collected here.
//!
//! ## Architecture
//!
//! - **`io`**: Directory creation, file reading, and resolving names against
//!   the handle's working directory.
//! - **`pattern`**: Splitting and glob-expanding the file pattern given to
//!   `create`, since commands never go through a shell.
//!
//! Functions are imported from their submodule, e.g.
//! `crate::common::fs::pattern::expand_pattern`.
//!

/// Basic file I/O operations (`ensure_dir_exists`, `read_file_to_string`, `resolve_in`).
pub mod io;
/// File pattern expansion for archive creation (`expand_pattern`).
pub mod pattern;
