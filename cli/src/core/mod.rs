//! # tar-external Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Cross-cutting infrastructure used by both the library and the `tarx` binary.
//!
//! - `config`: Configuration loading, merging, and validation
//! - `error`: `TarError`, `ConfigError`, and the `Result` aliases
//!
//! ```rust
//! use tar_external::core::config; // For loading configuration
//! use tar_external::core::error::{TarError, TarResult}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
