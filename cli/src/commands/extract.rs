//! # tarx Extract Handler
//!
//! File: cli/src/commands/extract.rs
//!
//! ## Overview
//!
//! Implements `tarx extract <archive> [files]...`. Without file arguments
//! every member is extracted. With `--to DIR` the members are written below
//! `DIR`, which is created if needed. The archive is never removed.
//!
//! Whether asking for a member that is not in the archive is an error depends
//! on the archiver: GNU tar and bsdtar fail, some older tar programs do not.
//!
//! ## Usage
//!
//! ```bash
//! tarx extract test.tar
//! tarx extract test.tar temp2.txt --to restored
//! ```
//!
use super::AppContext;
use clap::Parser;
use std::path::PathBuf;
use tar_external::core::error::Result;
use tracing::info;

/// # Extract Arguments (`ExtractArgs`)
#[derive(Parser, Debug)]
#[command(about = "Extract all or selected members of an archive")]
pub struct ExtractArgs {
    /// Archive file to extract from.
    archive: String,

    /// Members to extract. Extracts everything when omitted.
    files: Vec<String>,

    /// Directory to extract into (created if missing).
    #[arg(long, value_name = "DIR")]
    to: Option<PathBuf>,
}

/// Handles `tarx extract`.
pub fn handle_extract(args: ExtractArgs, ctx: &AppContext) -> Result<()> {
    info!(
        "Handling extract command for '{}' ({} member(s) requested)",
        args.archive,
        args.files.len()
    );
    let tar = ctx.handle(&args.archive)?;
    match &args.to {
        Some(dir) => tar.extract_to(dir, &args.files)?,
        None => tar.extract(&args.files)?,
    };
    Ok(())
}
