//! # tarx Compress Handler
//!
//! File: cli/src/commands/compress.rs
//!
//! ## Overview
//!
//! Implements `tarx compress <archive>`: runs the compressor on the archive
//! and prints the name of the compressed file it produced. The compressor is
//! `--program` if given, else `tools.compress_program` from configuration
//! (default `gzip`). Program strings may carry arguments, e.g. `"xz -9"`.
//!
use super::AppContext;
use clap::Parser;
use tar_external::core::error::Result;
use tracing::{info, warn};

/// # Compress Arguments (`CompressArgs`)
#[derive(Parser, Debug)]
#[command(about = "Compress an archive file with an external compressor")]
pub struct CompressArgs {
    /// Archive file to compress.
    archive: String,

    /// Compressor to run, with any arguments.
    #[arg(short, long)]
    program: Option<String>,
}

/// Handles `tarx compress`.
pub fn handle_compress(args: CompressArgs, ctx: &AppContext) -> Result<()> {
    let program = args
        .program
        .unwrap_or_else(|| ctx.config.tools.compress_program.clone());
    info!("Handling compress command for '{}' with '{}'", args.archive, program);

    let mut tar = ctx.handle(&args.archive)?;
    tar.compress(Some(program.as_str()))?;
    match tar.compressed_archive_name() {
        Some(name) => println!("{}", name),
        None => warn!(
            "Compression finished, but the compressed file for '{}' could not be located",
            args.archive
        ),
    }
    Ok(())
}
