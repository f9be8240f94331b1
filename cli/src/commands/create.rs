//! # tarx Create Handler
//!
//! File: cli/src/commands/create.rs
//!
//! ## Overview
//!
//! Implements `tarx create <archive> <pattern>...`. The pattern words are
//! handed to `TarExternal::create`, which expands globs itself, so a quoted
//! `'*.txt'` and a shell-expanded list of files both work.
//!
//! ## Usage
//!
//! ```bash
//! tarx create test.tar '*.txt'
//! tarx create test.tar.bz2 '*.txt' --options cjf
//! tarx create test.tar docs src --compress          # configured compressor
//! tarx create test.tar docs --compress "xz -9"      # explicit compressor
//! ```
//!
use super::AppContext;
use clap::Parser;
use tar_external::core::error::Result;
use tracing::info;

/// # Create Arguments (`CreateArgs`)
#[derive(Parser, Debug)]
#[command(about = "Create an archive from files matching a pattern")]
pub struct CreateArgs {
    /// Archive file to create, e.g. `test.tar`.
    archive: String,

    /// File names or glob patterns (quote globs to let tarx expand them).
    #[arg(required = true, num_args = 1..)]
    pattern: Vec<String>,

    /// Archiver options; letters only, `f` last.
    #[arg(short, long, default_value = "cf")]
    options: String,

    /// Compress the archive afterwards, with PROGRAM or the configured compressor.
    #[arg(long, value_name = "PROGRAM", num_args = 0..=1, default_missing_value = "")]
    compress: Option<String>,
}

/// Handles `tarx create`: creates the archive and optionally compresses it,
/// printing the name of the resulting file.
pub fn handle_create(args: CreateArgs, ctx: &AppContext) -> Result<()> {
    info!(
        "Handling create command for '{}' ({} pattern word(s))",
        args.archive,
        args.pattern.len()
    );
    let pattern = join_words(&args.pattern);
    let mut tar = ctx.handle(&args.archive)?;
    tar.create(&pattern, Some(args.options.as_str()))?;

    if let Some(program) = args.compress {
        let program = if program.trim().is_empty() {
            ctx.config.tools.compress_program.clone()
        } else {
            program
        };
        tar.compress(Some(program.as_str()))?;
    }

    println!(
        "{}",
        tar.compressed_archive_name().unwrap_or(tar.archive_name())
    );
    Ok(())
}

/// Joins words into one pattern string, single-quoting any word the pattern
/// splitter would otherwise break apart. Quoted words are taken literally;
/// unquoted globs such as `*.txt` are still expanded.
fn join_words(words: &[String]) -> String {
    words
        .iter()
        .map(|word| {
            let needs_quotes = word.is_empty()
                || word
                    .chars()
                    .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\'));
            if needs_quotes {
                format!("'{}'", word.replace('\'', r"'\''"))
            } else {
                word.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
