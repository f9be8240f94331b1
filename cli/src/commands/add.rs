//! # tarx Add Handler
//!
//! File: cli/src/commands/add.rs
//!
//! ## Overview
//!
//! Implements `tarx add <archive> <files>...`, appending the files to the
//! archive (`tar rf`). Files already in the archive are appended again; use
//! `tarx update` to skip unchanged ones. A missing archive is created.
//!
use super::AppContext;
use clap::Parser;
use tar_external::core::error::Result;
use tracing::info;

/// # Add Arguments (`AddArgs`)
#[derive(Parser, Debug)]
#[command(about = "Append files to an archive")]
pub struct AddArgs {
    /// Archive file to append to.
    archive: String,

    /// Files to append.
    #[arg(required = true, num_args = 1..)]
    files: Vec<String>,
}

/// Handles `tarx add`.
pub fn handle_add(args: AddArgs, ctx: &AppContext) -> Result<()> {
    info!(
        "Handling add command for '{}' ({} file(s))",
        args.archive,
        args.files.len()
    );
    ctx.handle(&args.archive)?.add(&args.files)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_args_parsing() {
        let args = AddArgs::try_parse_from(["add", "test.tar", "a.txt", "b.txt"]).unwrap();
        assert_eq!(args.archive, "test.tar");
        assert_eq!(args.files, vec!["a.txt", "b.txt"]);
        assert!(AddArgs::try_parse_from(["add", "test.tar"]).is_err());
    }
}
