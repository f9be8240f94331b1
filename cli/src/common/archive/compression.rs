//! # tar-external Compression Utilities (`common::archive::compression`)
//!
//! File: cli/src/common/archive/compression.rs
//!
//! ## Overview
//!
//! Compression is delegated to an external program (`gzip` by default,
//! `gunzip` for the reverse). This module runs that program against a single
//! file and works out the file names on either side of it.
//!
//! ## Architecture
//!
//! - **`run_compressor`**: Splits a program string (`"gzip -f"`), appends the
//!   target file, runs it, and maps failure to `TarError::Compression`.
//! - **`decompress_file`**: The handle-free decompression entry point for a
//!   compressed archive that no `TarExternal` knows about.
//! - **`discover_compressed_name`**: After compressing `test.tar`, finds which
//!   file the compressor actually produced. Known extensions are checked in
//!   priority order, then a glob over `test.tar.*` is tried for the rarer ones.
//! - **`archive_name_for`**: The reverse mapping: `test.tar.gz` -> `test.tar`,
//!   `test.tgz` -> `test.tar`.
//!
//! ## Usage
//!
//! ```rust
//! use tar_external::common::archive::compression::archive_name_for;
//!
//! assert_eq!(archive_name_for("backups/site.tgz"), "backups/site.tar");
//! assert_eq!(archive_name_for("site.tar.bz2"), "site.tar");
//! ```
//!
use crate::common::fs::io::resolve_in;
use crate::common::process::{failure_message, split_program, CommandRunner, Invocation};
use crate::core::error::{TarError, TarResult};
use std::path::Path;
use tracing::{debug, info, warn};

/// Compressor used when none is given.
pub const DEFAULT_COMPRESS_PROGRAM: &str = "gzip";

/// Decompressor used when none is given.
pub const DEFAULT_DECOMPRESS_PROGRAM: &str = "gunzip";

/// Extensions checked after compression, highest priority first.
pub const COMPRESSED_EXTENSIONS: [&str; 6] = ["gz", "bz2", "xz", "Z", "lz", "lzma"];

/// Extensions accepted by the glob fallback when none of
/// `COMPRESSED_EXTENSIONS` exists.
pub const FALLBACK_EXTENSIONS: [&str; 4] = ["cpio", "zip", "zst", "lz4"];

/// # Run Compressor (`run_compressor`)
///
/// Runs `program` (which may carry its own arguments) against `target`.
///
/// ## Arguments
///
/// * `runner` - The `CommandRunner` that launches the program.
/// * `program` - Program string such as `"gzip"` or `"xz -9"`, split with
///   `process::split_program`.
/// * `target` - File the program operates on, appended as the last argument.
/// * `working_dir` - Directory to run in; `None` for the current directory.
/// * `fallback` - Message prefix used when the program fails without writing
///   to stderr, e.g. `"Compression failed"`.
///
/// ## Errors
///
/// Returns `TarError::Compression` if the program string is empty or has an
/// unterminated quote, the program cannot be launched, or it exits non-zero.
pub fn run_compressor<R: CommandRunner>(
    runner: &R,
    program: &str,
    target: &str,
    working_dir: Option<&Path>,
    fallback: &str,
) -> TarResult<()> {
    let words = split_program(program)
        .ok_or_else(|| TarError::Compression(format!("Invalid program string: {}", program)))?;
    let invocation = Invocation::from_words(words, [target])
        .ok_or_else(|| TarError::Compression("no compression program specified".to_string()))?
        .in_dir(working_dir);

    debug!("Running compressor: {}", invocation);
    let output = runner.run(&invocation).map_err(|e| {
        TarError::Compression(format!("Failed to run '{}': {}", invocation.program, e))
    })?;

    if !output.success() {
        return Err(TarError::Compression(failure_message(&output, fallback)));
    }
    Ok(())
}

/// # Decompress File (`decompress_file`)
///
/// Decompresses `file` without needing an archive handle.
///
/// ## Arguments
///
/// * `runner` - The `CommandRunner` that launches the decompressor.
/// * `file` - The compressed file, e.g. `test.tar.gz`.
/// * `program` - Decompressor program string; `None` means `gunzip`.
/// * `working_dir` - Directory to run in; `None` for the current directory.
///
/// ## Errors
///
/// Returns `TarError::Compression` if the program cannot be launched or exits
/// non-zero.
pub fn decompress_file<R: CommandRunner>(
    runner: &R,
    file: &str,
    program: Option<&str>,
    working_dir: Option<&Path>,
) -> TarResult<()> {
    let program = program.unwrap_or(DEFAULT_DECOMPRESS_PROGRAM);
    info!("Decompressing '{}' with '{}'", file, program);
    run_compressor(runner, program, file, working_dir, "Decompression failed")
}

/// # Discover Compressed Name (`discover_compressed_name`)
///
/// Finds the file produced by compressing `archive_name`.
///
/// `<archive>.<ext>` is checked for each of `COMPRESSED_EXTENSIONS` in order.
/// Failing that, `<archive>.*` is globbed and the first match whose file name
/// is exactly `<archive>.<ext>` with `ext` in `FALLBACK_EXTENSIONS` is taken.
/// Files such as `test.tar.old.zip` never match `test.tar`.
///
/// ## Returns
///
/// The name in the same form as `archive_name` (relative names stay
/// relative), or `None` if no candidate exists.
pub fn discover_compressed_name(archive_name: &str, working_dir: Option<&Path>) -> Option<String> {
    for ext in COMPRESSED_EXTENSIONS {
        let candidate = format!("{}.{}", archive_name, ext);
        if resolve_in(working_dir, &candidate).exists() {
            debug!("Found compressed archive '{}'", candidate);
            return Some(candidate);
        }
    }

    let base = resolve_in(working_dir, archive_name);
    let base_file_name = base.file_name()?.to_string_lossy().into_owned();
    let pattern = format!("{}.*", glob::Pattern::escape(&base.to_string_lossy()));
    let paths = match glob::glob(&pattern) {
        Ok(paths) => paths,
        Err(e) => {
            warn!("Could not search for compressed archive with {:?}: {}", pattern, e);
            return None;
        }
    };
    let found = paths.filter_map(|entry| entry.ok()).find_map(|path| {
        let file_name = path.file_name()?.to_str()?;
        let ext = file_name.strip_prefix(base_file_name.as_str())?.strip_prefix('.')?;
        FALLBACK_EXTENSIONS
            .contains(&ext)
            .then(|| format!("{}.{}", archive_name, ext))
    });
    if let Some(name) = &found {
        debug!("Found compressed archive '{}' via fallback search", name);
    }
    found
}

/// # Archive Name For (`archive_name_for`)
///
/// Derives the uncompressed archive name from a compressed file name.
///
/// A `.tgz` extension (any case) becomes `.tar`; any other extension is
/// stripped; a name without an extension is returned unchanged. Directory
/// components are kept.
pub fn archive_name_for(compressed: &str) -> String {
    let path = Path::new(compressed);
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext,
        None => return compressed.to_string(),
    };
    // `extension()` is a suffix of the final component, so this slice is on a
    // char boundary.
    let stem = &compressed[..compressed.len() - ext.len() - 1];
    if ext.eq_ignore_ascii_case("tgz") {
        format!("{}.tar", stem)
    } else {
        stem.to_string()
    }
}
