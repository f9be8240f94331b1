//! # tar-external Library Root
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! tar-external drives the system's `tar` and gzip-family programs so callers
//! do not have to assemble command lines by hand. The central type is
//! `TarExternal`, a handle on one archive file:
//!
//! ```rust,no_run
//! use tar_external::TarExternal;
//!
//! # fn main() -> Result<(), tar_external::TarError> {
//! let mut tar = TarExternal::new("site.tar")?.with_working_dir("/srv/www");
//! tar.create("*.html assets", None)?;
//! tar.add(&["robots.txt"])?;
//! let members = tar.list()?;
//! tar.compress(Some("xz"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `common::process`: The `CommandRunner` trait every command goes through.
//!   Swap the runner to test without spawning processes.
//! - `common::archive`: `TarExternal` and compression helpers.
//! - `common::fs`: File pattern expansion and I/O helpers.
//! - `core::error`: `TarError`, with `Execution` (archiver) and `Compression`
//!   (compressor) kinds.
//! - `core::config`: TOML configuration used by the `tarx` binary.
//!

pub mod common;
pub mod core;

pub use crate::common::archive::compression::decompress_file;
pub use crate::common::archive::tar::{extract_file, TarExternal};
pub use crate::common::process::{CommandRunner, Invocation, ProcessOutput, SystemRunner};
pub use crate::core::error::{TarError, TarResult};

/// Version of the tar-external library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
