//! # tarx Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per `tarx` subcommand. Each defines a Clap `...Args` struct and a
//! `handle_...` function that builds a `TarExternal` from the shared
//! `AppContext`, runs one operation, and prints the result.
//!
//! ## Commands
//!
//! - `create`: Create an archive from a file pattern, optionally compressing it
//! - `list`: Print member names in archive order
//! - `add`: Append files to an archive
//! - `update`: Append files that are new or changed
//! - `extract`: Extract all or some members, optionally into a directory
//! - `compress`: Compress an archive file
//! - `decompress`: Decompress a compressed archive file
//!
use std::path::PathBuf;
use tar_external::core::config::Config;
use tar_external::core::error::Result;
use tar_external::TarExternal;

pub mod add;
pub mod compress;
pub mod create;
pub mod decompress;
pub mod extract;
pub mod list;
pub mod update;

/// Configuration and global flags shared by every handler.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub working_dir: Option<PathBuf>,
}

impl AppContext {
    pub fn new(config: Config, working_dir: Option<PathBuf>) -> Self {
        Self {
            config,
            working_dir,
        }
    }

    /// Builds a handle for `archive` using the configured archiver and format.
    pub fn handle(&self, archive: &str) -> Result<TarExternal> {
        let mut tar = TarExternal::new(archive)?
            .with_tar_program(self.config.tools.tar_program.as_str())
            .with_format(self.config.tools.format.as_str());
        if let Some(dir) = &self.working_dir {
            tar = tar.with_working_dir(dir.clone());
        }
        Ok(tar)
    }
}
