//! # tar-external Archive Handle (`common::archive::tar`)
//!
//! File: cli/src/common/archive/tar.rs
//!
//! ## Overview
//!
//! `TarExternal` is a handle on one archive file. It does no archiving itself:
//! each method builds an argument vector for the external `tar` program (or a
//! compressor), runs it once through a `CommandRunner`, and turns a non-zero
//! exit into a typed `TarError`.
//!
//! ## Architecture
//!
//! - The handle owns the archive name, the name of the compressed file (if the
//!   archive is currently compressed), the archiver program, the `--format`
//!   value used on creation, and an optional working directory.
//! - Archiver failures become `TarError::Execution`; compressor failures
//!   become `TarError::Compression`. The message is the tool's stderr, or a
//!   fallback naming the exit status.
//! - Mutating operations return `&mut Self` so calls chain with `?`.
//! - `extract_file` and `TarExternal::extract_path` / `decompress_path` work
//!   on a bare file name without a handle.
//!
//! | Operation    | Command                                              |
//! |--------------|------------------------------------------------------|
//! | `create`     | `tar --format <format> -<options> <archive> <files>` |
//! | `list`       | `tar tf <archive>`                                   |
//! | `add`        | `tar rf <archive> <files>`                           |
//! | `update`     | `tar uf <archive> <files>`                           |
//! | `extract`    | `tar xf <archive> [files]`                           |
//! | `extract_to` | `tar xf <archive> -C <dir> [files]`                  |
//! | `compress`   | `<program> <archive>`                                |
//! | `decompress` | `<program> <compressed archive>`                     |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tar_external::TarExternal;
//!
//! # fn main() -> Result<(), tar_external::TarError> {
//! let mut tar = TarExternal::new("logs.tar")?;
//! tar.create("*.log", None)?.compress(None)?;
//! assert_eq!(tar.compressed_archive_name(), Some("logs.tar.gz"));
//!
//! tar.decompress(None)?;
//! for member in tar.list()? {
//!     println!("{}", member);
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::common::archive::compression::{
    self, archive_name_for, discover_compressed_name, run_compressor, DEFAULT_COMPRESS_PROGRAM,
};
use crate::common::fs::io::ensure_dir_exists;
use crate::common::fs::pattern::expand_pattern;
use crate::common::process::{failure_message, CommandRunner, Invocation, ProcessOutput, SystemRunner};
use crate::core::error::{TarError, TarResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Archiver used when none is configured.
pub const DEFAULT_TAR_PROGRAM: &str = "tar";

/// Archive format passed to `--format` on creation.
pub const DEFAULT_FORMAT: &str = "pax";

/// Options used by `create` when none are given. `f` must stay last, since
/// the archive name follows it.
pub const DEFAULT_CREATE_OPTIONS: &str = "cf";

/// A handle on one archive file, operated on through external programs.
#[derive(Debug, Clone)]
pub struct TarExternal<R = SystemRunner> {
    archive_name: String,
    compressed_archive_name: Option<String>,
    tar_program: String,
    format: String,
    working_dir: Option<PathBuf>,
    runner: R,
}

impl TarExternal<SystemRunner> {
    /// # New Handle (`new`)
    ///
    /// Creates a handle for `archive_name` that runs commands with
    /// `SystemRunner`. The file itself is not touched.
    ///
    /// ## Arguments
    ///
    /// * `archive_name` - Path of the archive, relative to the working
    ///   directory if one is set later.
    ///
    /// ## Errors
    ///
    /// Returns `TarError::InvalidArgument` if the name is empty.
    pub fn new(archive_name: impl Into<String>) -> TarResult<Self> {
        Self::with_runner(archive_name, SystemRunner)
    }

    /// # Handle From Pattern (`from_pattern`)
    ///
    /// Creates a handle and, optionally, populates and compresses the archive
    /// straight away.
    ///
    /// ## Arguments
    ///
    /// * `archive_name` - Path of the archive to create.
    /// * `pattern` - When set, runs `create(pattern, None)`.
    /// * `compress_with` - When set, then runs `compress(Some(program))`.
    ///
    /// ## Errors
    ///
    /// Returns whatever `new`, `create` or `compress` returns, in that order.
    pub fn from_pattern(
        archive_name: impl Into<String>,
        pattern: Option<&str>,
        compress_with: Option<&str>,
    ) -> TarResult<Self> {
        let mut tar = Self::new(archive_name)?;
        if let Some(pattern) = pattern {
            tar.create(pattern, None)?;
        }
        if let Some(program) = compress_with {
            tar.compress(Some(program))?;
        }
        Ok(tar)
    }

    /// # Decompress Path (`decompress_path`)
    ///
    /// Decompresses a file no handle knows about, with `program` or `gunzip`,
    /// in the current directory.
    ///
    /// ## Errors
    ///
    /// Returns `TarError::Compression` if the program cannot be launched or
    /// exits non-zero.
    pub fn decompress_path(file: &str, program: Option<&str>) -> TarResult<()> {
        compression::decompress_file(&SystemRunner, file, program, None)
    }

    /// # Extract Path (`extract_path`)
    ///
    /// Extracts `files` (or everything, if empty) from `archive` with the
    /// default `tar` program, in the current directory.
    ///
    /// ## Errors
    ///
    /// Returns `TarError::Execution` if the archiver cannot be launched or
    /// exits non-zero.
    pub fn extract_path<S: AsRef<str>>(archive: &str, files: &[S]) -> TarResult<()> {
        extract_file(&SystemRunner, DEFAULT_TAR_PROGRAM, archive, files, None)
    }
}

impl<R: CommandRunner> TarExternal<R> {
    /// Creates a handle that runs its commands through `runner`.
    pub fn with_runner(archive_name: impl Into<String>, runner: R) -> TarResult<Self> {
        let archive_name = archive_name.into();
        if archive_name.trim().is_empty() {
            return Err(TarError::InvalidArgument(
                "archive name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            archive_name,
            compressed_archive_name: None,
            tar_program: DEFAULT_TAR_PROGRAM.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            working_dir: None,
            runner,
        })
    }

    /// Uses `program` instead of `tar` (e.g. `gtar`, or a full path).
    pub fn with_tar_program(mut self, program: impl Into<String>) -> Self {
        self.tar_program = program.into();
        self
    }

    /// Uses `format` for `--format` on creation instead of `pax`.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Runs every command in `dir`. Relative archive and member names are
    /// then relative to `dir`.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    pub fn set_archive_name(&mut self, name: impl Into<String>) {
        self.archive_name = name.into();
    }

    /// Name of the compressed archive, if the archive is currently compressed.
    pub fn compressed_archive_name(&self) -> Option<&str> {
        self.compressed_archive_name.as_deref()
    }

    /// Records an existing compressed archive and derives the archive name
    /// from it: `test.tar.gz` -> `test.tar`, `test.tgz` -> `test.tar`.
    ///
    /// Use this to attach a handle to a compressed archive created elsewhere
    /// before calling `decompress`.
    pub fn set_compressed_archive_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.archive_name = archive_name_for(&name);
        self.compressed_archive_name = Some(name);
    }

    pub fn tar_program(&self) -> &str {
        &self.tar_program
    }

    pub fn set_tar_program(&mut self, program: impl Into<String>) {
        self.tar_program = program.into();
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// # Create Archive (`create`)
    ///
    /// Creates the archive from the files matching `pattern`, running
    /// `<tar> --format <format> -<options> <archive> <files...>`.
    ///
    /// ## Arguments
    ///
    /// * `pattern` - One or more words, each a file name or glob; see
    ///   `common::fs::pattern` for quoting and expansion.
    /// * `options` - Archiver options, default `"cf"`. ASCII letters only,
    ///   with `f` last (e.g. `"cjf"` for a bzip2-compressed archive).
    ///
    /// ## Returns
    ///
    /// The handle, so further operations can be chained.
    ///
    /// ## Errors
    ///
    /// Returns `TarError::Execution` if:
    /// - `options` is empty or contains anything but letters.
    /// - The pattern is empty or has an unterminated quote.
    /// - The archiver fails, including when nothing matches the pattern.
    pub fn create(&mut self, pattern: &str, options: Option<&str>) -> TarResult<&mut Self> {
        let options = options.unwrap_or(DEFAULT_CREATE_OPTIONS);
        if options.is_empty() || !options.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(TarError::Execution(format!(
                "Invalid options format: {}",
                options
            )));
        }

        let files = expand_pattern(pattern, self.working_dir())
            .ok_or_else(|| TarError::Execution(format!("Invalid file pattern: {}", pattern)))?;
        if files.is_empty() {
            return Err(TarError::Execution(
                "there must be at least one file specified".to_string(),
            ));
        }

        info!(
            "Creating archive '{}' from pattern {:?} ({} file arguments)",
            self.archive_name,
            pattern,
            files.len()
        );
        let mut args = vec![
            "--format".to_string(),
            self.format.clone(),
            format!("-{}", options),
            self.archive_name.clone(),
        ];
        args.extend(files);
        self.run_tar(args, "Command failed")?;
        Ok(self)
    }

    /// # Compress Archive (`compress`)
    ///
    /// Compresses the archive with `program` (default `gzip`) and records the
    /// name of the file it produced, as found by `discover_compressed_name`.
    ///
    /// ## Arguments
    ///
    /// * `program` - Compressor program string; may carry arguments, e.g.
    ///   `"gzip -f"` or `"xz -9"`.
    ///
    /// ## Errors
    ///
    /// Returns `TarError::Compression` if the program cannot be launched or
    /// exits non-zero. A compressor that succeeds without leaving a
    /// recognisable file is logged, not treated as an error.
    pub fn compress(&mut self, program: Option<&str>) -> TarResult<&mut Self> {
        let program = program.unwrap_or(DEFAULT_COMPRESS_PROGRAM);
        info!("Compressing '{}' with '{}'", self.archive_name, program);
        run_compressor(
            &self.runner,
            program,
            &self.archive_name,
            self.working_dir(),
            "Compression failed",
        )?;

        self.compressed_archive_name =
            discover_compressed_name(&self.archive_name, self.working_dir());
        match &self.compressed_archive_name {
            Some(name) => debug!("Compressed archive is '{}'", name),
            None => warn!(
                "'{}' succeeded but no compressed file for '{}' was found",
                program, self.archive_name
            ),
        }
        Ok(self)
    }

    /// # Decompress Archive (`decompress`)
    ///
    /// Decompresses the recorded compressed archive with `program` (default
    /// `gunzip`) and forgets the compressed name.
    ///
    /// This only undoes `compress`; use `extract` to unpack members.
    ///
    /// ## Errors
    ///
    /// Returns `TarError::Compression` if no compressed archive is recorded,
    /// or the program cannot be launched or exits non-zero. The recorded name
    /// is kept on failure.
    pub fn decompress(&mut self, program: Option<&str>) -> TarResult<&mut Self> {
        let compressed = self
            .compressed_archive_name
            .as_deref()
            .ok_or_else(|| TarError::Compression("no compressed file found".to_string()))?;
        compression::decompress_file(&self.runner, compressed, program, self.working_dir())?;
        self.compressed_archive_name = None;
        Ok(self)
    }

    /// # List Members (`list`)
    ///
    /// Runs `<tar> tf <archive>`. The archive is not extracted.
    ///
    /// ## Returns
    ///
    /// Member names in the order the archiver lists them.
    ///
    /// ## Errors
    ///
    /// Returns `TarError::Execution` if the archiver cannot be launched or
    /// exits non-zero (e.g. the archive does not exist).
    pub fn list(&self) -> TarResult<Vec<String>> {
        let output = self.run_tar(vec!["tf".to_string(), self.archive_name.clone()], "Command failed")?;
        let members: Vec<String> = output.stdout.lines().map(str::to_string).collect();
        debug!("'{}' has {} members", self.archive_name, members.len());
        Ok(members)
    }

    /// # Add Files (`add`)
    ///
    /// Runs `<tar> rf <archive> <files...>`, appending `files` to the archive
    /// (creating it if it does not exist).
    ///
    /// ## Errors
    ///
    /// `TarError::Execution` if `files` is empty or the archiver fails.
    pub fn add<S: AsRef<str>>(&mut self, files: &[S]) -> TarResult<&mut Self> {
        self.modify("rf", files, "Command failed")?;
        Ok(self)
    }

    /// # Update Files (`update`)
    ///
    /// Runs `<tar> uf <archive> <files...>`, appending the `files` that are
    /// missing from the archive or newer than the archived copy.
    ///
    /// ## Errors
    ///
    /// `TarError::Execution` if `files` is empty or the archiver fails.
    pub fn update<S: AsRef<str>>(&mut self, files: &[S]) -> TarResult<&mut Self> {
        self.modify("uf", files, "Failed to update files in archive")?;
        Ok(self)
    }

    /// # Extract Members (`extract`)
    ///
    /// Extracts `files` from the archive, or every member if `files` is empty.
    /// The archive itself is left in place.
    ///
    /// ## Errors
    ///
    /// Returns `TarError::Execution` if the archiver cannot be launched or
    /// exits non-zero.
    ///
    /// Some archivers (notably older Solaris `tar`) succeed silently when a
    /// requested member does not exist; that result is passed through as-is.
    pub fn extract<S: AsRef<str>>(&self, files: &[S]) -> TarResult<&Self> {
        extract_file(
            &self.runner,
            &self.tar_program,
            &self.archive_name,
            files,
            self.working_dir(),
        )?;
        Ok(self)
    }

    /// # Extract Into Directory (`extract_to`)
    ///
    /// Like `extract`, but runs `<tar> xf <archive> -C <dir> <files...>`,
    /// creating `dir` first if needed.
    ///
    /// ## Arguments
    ///
    /// * `dir` - Destination directory. A relative `dir` is resolved against
    ///   the working directory.
    /// * `files` - Members to extract; empty means all.
    ///
    /// ## Errors
    ///
    /// Returns `TarError::Execution` if `dir` cannot be created, or the
    /// archiver cannot be launched or exits non-zero.
    pub fn extract_to<S: AsRef<str>>(&self, dir: &Path, files: &[S]) -> TarResult<&Self> {
        let target = match self.working_dir() {
            Some(base) => base.join(dir),
            None => dir.to_path_buf(),
        };
        ensure_dir_exists(&target).map_err(|e| TarError::Execution(format!("{:#}", e)))?;

        let mut args = vec![
            "xf".to_string(),
            self.archive_name.clone(),
            "-C".to_string(),
            dir.to_string_lossy().into_owned(),
        ];
        args.extend(files.iter().map(|f| f.as_ref().to_string()));
        info!("Extracting '{}' into {:?}", self.archive_name, dir);
        self.run_tar(args, "Failed to extract archive")?;
        Ok(self)
    }

    fn modify<S: AsRef<str>>(&self, mode: &str, files: &[S], fallback: &str) -> TarResult<()> {
        if files.is_empty() {
            return Err(TarError::Execution(
                "there must be at least one file specified".to_string(),
            ));
        }
        let mut args = vec![mode.to_string(), self.archive_name.clone()];
        args.extend(files.iter().map(|f| f.as_ref().to_string()));
        info!("Running '{} {}' on '{}'", self.tar_program, mode, self.archive_name);
        self.run_tar(args, fallback)?;
        Ok(())
    }

    fn run_tar(&self, args: Vec<String>, fallback: &str) -> TarResult<ProcessOutput> {
        run_archiver(
            &self.runner,
            Invocation::new(self.tar_program.as_str(), args).in_dir(self.working_dir()),
            fallback,
        )
    }
}

/// # Extract File (`extract_file`)
///
/// Extracts `files` (or everything, if empty) from `archive` using
/// `tar_program`, without an archive handle.
///
/// ## Arguments
///
/// * `runner` - The `CommandRunner` that launches the archiver.
/// * `tar_program` - Archiver to run, e.g. `tar` or `gtar`.
/// * `archive` - The archive file.
/// * `files` - Members to extract; empty means all.
/// * `working_dir` - Directory to run in; `None` for the current directory.
///
/// ## Errors
///
/// Returns `TarError::Execution` if the archiver cannot be launched or exits
/// non-zero.
pub fn extract_file<R: CommandRunner, S: AsRef<str>>(
    runner: &R,
    tar_program: &str,
    archive: &str,
    files: &[S],
    working_dir: Option<&Path>,
) -> TarResult<()> {
    let mut args = vec!["xf".to_string(), archive.to_string()];
    args.extend(files.iter().map(|f| f.as_ref().to_string()));
    info!("Extracting {} member(s) from '{}'", describe_count(files.len()), archive);
    run_archiver(
        runner,
        Invocation::new(tar_program, args).in_dir(working_dir),
        "Failed to extract archive",
    )?;
    Ok(())
}

fn run_archiver<R: CommandRunner>(
    runner: &R,
    invocation: Invocation,
    fallback: &str,
) -> TarResult<ProcessOutput> {
    debug!("Running archiver: {}", invocation);
    let output = runner.run(&invocation).map_err(|e| {
        TarError::Execution(format!("Failed to run '{}': {}", invocation.program, e))
    })?;
    if !output.success() {
        return Err(TarError::Execution(failure_message(&output, fallback)));
    }
    Ok(output)
}

fn describe_count(n: usize) -> String {
    if n == 0 {
        "all".to_string()
    } else {
        n.to_string()
    }
}
