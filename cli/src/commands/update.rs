//! # tarx Update Handler
//!
//! File: cli/src/commands/update.rs
//!
//! ## Overview
//!
//! Implements `tarx update <archive> <files>...` (`tar uf`): each file is
//! appended only if it is not in the archive yet or is newer than the
//! archived copy.
//!
use super::AppContext;
use clap::Parser;
use tar_external::core::error::Result;
use tracing::info;

/// # Update Arguments (`UpdateArgs`)
#[derive(Parser, Debug)]
#[command(about = "Append files that are missing from an archive or have changed")]
pub struct UpdateArgs {
    /// Archive file to update.
    archive: String,

    /// Files to refresh.
    #[arg(required = true, num_args = 1..)]
    files: Vec<String>,
}

/// Handles `tarx update`.
pub fn handle_update(args: UpdateArgs, ctx: &AppContext) -> Result<()> {
    info!(
        "Handling update command for '{}' ({} file(s))",
        args.archive,
        args.files.len()
    );
    ctx.handle(&args.archive)?.update(&args.files)?;
    Ok(())
}
