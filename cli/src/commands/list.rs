//! # tarx List Handler
//!
//! File: cli/src/commands/list.rs
//!
//! ## Overview
//!
//! Implements `tarx list <archive>`: prints one member name per line, in the
//! order the archiver reports them. Nothing is extracted.
//!
use super::AppContext;
use clap::Parser;
use tar_external::core::error::Result;
use tracing::info;

/// # List Arguments (`ListArgs`)
#[derive(Parser, Debug)]
#[command(about = "List the members of an archive")]
pub struct ListArgs {
    /// Archive file to list.
    archive: String,
}

/// Handles `tarx list`.
pub fn handle_list(args: ListArgs, ctx: &AppContext) -> Result<()> {
    info!("Handling list command for '{}'", args.archive);
    let tar = ctx.handle(&args.archive)?;
    for member in tar.list()? {
        println!("{}", member);
    }
    Ok(())
}
