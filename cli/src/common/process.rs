//! # tar-external Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Every archive and compression operation ends up here: a program name, an
//! argument vector, and an optional working directory go in; captured stdout,
//! stderr and the exit status come out. Nothing is routed through a shell, so
//! arguments reach the child exactly as given.
//!
//! ## Architecture
//!
//! - **`Invocation`**: The fully-built command (program, args, working directory).
//! - **`ProcessOutput`**: What the child produced and how it exited.
//! - **`CommandRunner`**: The trait the archive handle calls through. Tests swap
//!   in a recording mock; production uses `SystemRunner`.
//! - **`SystemRunner`**: Runs the command with `std::process::Command::output`,
//!   stdin closed. `output()` waits for the child and drops both pipes on every
//!   return path.
//! - **`split_program`**: Turns a configured program string such as
//!   `"gzip -f"` or `"'/opt/my tools/xz' -9"` into an argument vector.
//! - **`failure_message`**: The error text for a failed run: trimmed stderr,
//!   or a fallback naming the exit status.
//!
//! ## Usage
//!
//! ```rust
//! use tar_external::common::process::{CommandRunner, Invocation, SystemRunner};
//!
//! # fn main() -> std::io::Result<()> {
//! let output = SystemRunner.run(&Invocation::new("echo", ["hello"]))?;
//! if output.success() {
//!     assert_eq!(output.stdout.trim(), "hello");
//! }
//! # Ok(())
//! # }
//! ```
//!
use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, trace};

/// A fully-built external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path, resolved through `PATH` by the OS.
    pub program: String,
    /// Arguments, passed verbatim.
    pub args: Vec<String>,
    /// Directory the child runs in. `None` inherits the current directory.
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    /// Builds an invocation that runs in the current directory.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
        }
    }

    /// Builds an invocation from a split program line (first word is the
    /// program, the rest are leading arguments) followed by `args`.
    ///
    /// Returns `None` when `words` is empty.
    pub fn from_words<I, S>(words: Vec<String>, args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = words.into_iter();
        let program = words.next()?;
        let mut all_args: Vec<String> = words.collect();
        all_args.extend(args.into_iter().map(Into::into));
        Some(Self {
            program,
            args: all_args,
            working_dir: None,
        })
    }

    /// Sets the working directory.
    pub fn in_dir(mut self, dir: Option<&Path>) -> Self {
        self.working_dir = dir.map(Path::to_path_buf);
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
    /// Exit code. `None` if the child was terminated by a signal.
    pub status: Option<i32>,
}

impl ProcessOutput {
    /// A successful run with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            status: Some(0),
        }
    }

    /// A failed run with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            status: Some(code),
        }
    }

    /// Whether the child exited with status 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// The seam between the archive handle and the operating system.
///
/// Implementations must not interpret the output; success/failure policy
/// lives with the caller.
pub trait CommandRunner {
    /// Runs `invocation` to completion and captures its output.
    ///
    /// An `Err` means the program could not be started at all (not found,
    /// permission denied); a program that starts and fails is an `Ok` with a
    /// non-zero status.
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        (**self).run(invocation)
    }
}

/// Runs commands with `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        debug!("Running: {}", invocation);
        let mut command = Command::new(&invocation.program);
        command.args(invocation.args.iter().map(OsStr::new));
        command.stdin(Stdio::null());
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        let output = command.output()?;
        let result = ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        };
        trace!(
            "'{}' exited with {:?} (stdout {} bytes, stderr {} bytes)",
            invocation.program,
            result.status,
            result.stdout.len(),
            result.stderr.len()
        );
        Ok(result)
    }
}

/// Builds the error text for a failed run.
///
/// Uses the child's stderr when it wrote anything, otherwise `fallback`
/// followed by the exit status. Pass `fallback` without trailing punctuation,
/// e.g. `"Command failed"`.
pub fn failure_message(output: &ProcessOutput, fallback: &str) -> String {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match output.status {
        Some(code) => format!("{} with exit status {}", fallback, code),
        None => format!("{}: terminated by signal", fallback),
    }
}

/// Splits a program string into words, honouring single quotes, double
/// quotes and backslash escapes the way a POSIX shell would for plain words.
///
/// No expansion of any kind is performed. Returns `None` on an unterminated
/// quote.
pub fn split_program(line: &str) -> Option<Vec<String>> {
    let words = split_marked(line)?;
    Some(
        words
            .into_iter()
            .map(|word| word.into_iter().map(|(c, _)| c).collect())
            .collect(),
    )
}

/// # Split Marking Quotes (`split_marked`)
///
/// Same splitting rules as `split_program`, but every character is paired with
/// whether it was quoted or backslash-escaped. Callers that expand words
/// afterwards (see `common::fs::pattern`) use the flag to leave quoted
/// metacharacters alone, as a shell does.
///
/// ## Returns
///
/// One `Vec<(char, bool)>` per word, or `None` on an unterminated quote.
pub fn split_marked(line: &str) -> Option<Vec<Vec<(char, bool)>>> {
    let mut words = Vec::new();
    let mut current = Vec::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '\'' => break,
                        other => current.push((other, true)),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => match chars.next()? {
                            escaped @ ('"' | '\\' | '$' | '`') => current.push((escaped, true)),
                            other => {
                                current.push(('\\', true));
                                current.push((other, true));
                            }
                        },
                        other => current.push((other, true)),
                    }
                }
            }
            '\\' => {
                in_word = true;
                if let Some(escaped) = chars.next() {
                    current.push((escaped, true));
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            other => {
                in_word = true;
                current.push((other, false));
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Some(words)
}
