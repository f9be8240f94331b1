//! # tar-external Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout tar-external.
//!
//! ## Architecture
//!
//! The error system consists of:
//! - `TarError`: A `thiserror` enum returned by every archive operation. Callers
//!   can match on the kind of failure (bad argument, archiver failure,
//!   compressor failure).
//! - `ConfigError`: Raised by configuration validation, wrapped in `anyhow`.
//! - `Result<T>`: A type alias for `anyhow::Result<T>` used by the configuration
//!   layer and the `tarx` command handlers, where adding context matters more
//!   than the concrete type.
//!
//! `TarResult<T>` is the library-level alias for `std::result::Result<T, TarError>`.
//!
//! ## Examples
//!
//! ```rust
//! use tar_external::{TarError, TarExternal};
//!
//! match TarExternal::new("") {
//!     Err(TarError::InvalidArgument(msg)) => println!("rejected: {}", msg),
//!     Err(other) => panic!("unexpected error: {}", other),
//!     Ok(_) => panic!("an empty name must be rejected"),
//! }
//! ```
//!
//! Inside the binary a `TarError` converts into `anyhow::Error` with `?`, and
//! can be recovered with `downcast_ref::<TarError>()`.
//!
use thiserror::Error;

/// Errors produced by archive and compression operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TarError {
    /// A required argument was missing or empty (e.g. constructing a handle
    /// without an archive name).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The archiver failed: non-zero exit from create/list/add/update/extract,
    /// invalid create options, an empty file list, or the archiver could not
    /// be launched.
    #[error("{0}")]
    Execution(String),

    /// The compressor or decompressor failed, could not be launched, or there
    /// was no compressed file to work on.
    #[error("{0}")]
    Compression(String),
}

impl TarError {
    /// Returns `true` for `TarError::Execution`.
    pub fn is_execution(&self) -> bool {
        matches!(self, TarError::Execution(_))
    }

    /// Returns `true` for `TarError::Compression`.
    pub fn is_compression(&self) -> bool {
        matches!(self, TarError::Compression(_))
    }
}

/// Errors found while loading or validating configuration files.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Result type returned by the archive handle and its helpers.
pub type TarResult<T> = std::result::Result<T, TarError>;

/// Type alias for Result using anyhow::Error for the application layer.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let arg_err = TarError::InvalidArgument("archive name must not be empty".to_string());
        assert_eq!(
            arg_err.to_string(),
            "Invalid argument: archive name must not be empty"
        );

        // Execution and compression errors carry the tool's own message verbatim.
        let exec_err = TarError::Execution("tar: blah.txt: Not found in archive".into());
        assert_eq!(exec_err.to_string(), "tar: blah.txt: Not found in archive");

        let comp_err = TarError::Compression("no compressed file found".into());
        assert_eq!(comp_err.to_string(), "no compressed file found");

        let cfg_err = ConfigError::Invalid("tools.format must not be empty".into());
        assert_eq!(
            cfg_err.to_string(),
            "Configuration error: tools.format must not be empty"
        );
    }

    #[test]
    fn test_error_kind_predicates() {
        assert!(TarError::Execution(String::new()).is_execution());
        assert!(!TarError::Execution(String::new()).is_compression());
        assert!(TarError::Compression(String::new()).is_compression());
        assert!(!TarError::InvalidArgument(String::new()).is_execution());
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = TarError::Compression("gzip: broken".into()).into();
        assert!(matches!(
            err.downcast_ref::<TarError>(),
            Some(TarError::Compression(_))
        ));
    }
}
