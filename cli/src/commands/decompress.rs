//! # tarx Decompress Handler
//!
//! File: cli/src/commands/decompress.rs
//!
//! ## Overview
//!
//! Implements `tarx decompress <compressed>`. The compressed name is attached
//! to a handle with `set_compressed_archive_name`, which also works out the
//! archive name the decompressor will leave behind (`x.tar.gz` -> `x.tar`,
//! `x.tgz` -> `x.tar`). That name is printed on success.
//!
//! The decompressor is `--program` if given, else
//! `tools.decompress_program` (default `gunzip`).
//!
use super::AppContext;
use clap::Parser;
use tar_external::core::error::Result;
use tracing::info;

/// # Decompress Arguments (`DecompressArgs`)
#[derive(Parser, Debug)]
#[command(about = "Decompress a compressed archive file")]
pub struct DecompressArgs {
    /// Compressed archive to decompress, e.g. `test.tar.gz`.
    compressed: String,

    /// Decompressor to run, with any arguments.
    #[arg(short, long)]
    program: Option<String>,
}

/// Handles `tarx decompress`.
pub fn handle_decompress(args: DecompressArgs, ctx: &AppContext) -> Result<()> {
    let program = args
        .program
        .unwrap_or_else(|| ctx.config.tools.decompress_program.clone());
    info!(
        "Handling decompress command for '{}' with '{}'",
        args.compressed, program
    );

    let mut tar = ctx.handle(&args.compressed)?;
    tar.set_compressed_archive_name(args.compressed.as_str());
    tar.decompress(Some(program.as_str()))?;
    println!("{}", tar.archive_name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompress_args_parsing() {
        let args = DecompressArgs::try_parse_from(["decompress", "test.tgz"]).unwrap();
        assert_eq!(args.compressed, "test.tgz");
        assert!(args.program.is_none());
        assert!(DecompressArgs::try_parse_from(["decompress"]).is_err());
    }
}
