//! # tar-external Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks of the library: running external programs, the
//! archive handle built on top of that, and the small amount of filesystem
//! work the handle does itself.
//!
//! ## Architecture
//!
//! - **`archive`**: The `TarExternal` handle and compression helpers.
//! - **`fs`**: File pattern expansion and basic I/O helpers.
//! - **`process`**: The `CommandRunner` seam, the system runner, and program
//!   string splitting.
//!
//! Dependencies only point downwards: `archive` uses `fs` and `process`;
//! `fs` uses `process` for word splitting; `process` depends on nothing else
//! in the crate.
//!

/// The archive handle and compression helpers.
pub mod archive;
/// Pattern expansion and file I/O helpers.
pub mod fs;
/// External process execution.
pub mod process;
