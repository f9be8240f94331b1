//! # tar-external Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads the program names and archive format the `tarx` binary hands to
//! `TarExternal`. The library itself never reads configuration; it takes
//! program names explicitly.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags and `TARX_*` environment variables (applied by the
//!    binary through `Config::apply_overrides`)
//! 2. Project-specific `.tarx.toml` in the current directory or an ancestor,
//!    stopping at the first directory that contains `.git`
//! 3. User-specific `config.toml` in the platform config directory
//!    (`~/.config/tarx/config.toml` on Linux), or the file named by `TARX_CONFIG`
//! 4. Default values defined in the code
//!
//! After merging, `~` in program paths is expanded and the result is validated.
//!
//! ## Examples
//!
//! ```toml
//! # .tarx.toml
//! [tools]
//! tar_program = "gtar"
//! format = "gnu"
//! compress_program = "xz -T0"
//! decompress_program = "unxz"
//! ```
//!
//! ```rust,no_run
//! use tar_external::core::config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = config::load_config()?;
//! println!("archiver: {}", cfg.tools.tar_program);
//! # Ok(())
//! # }
//! ```
//!
use crate::common::archive::compression::{DEFAULT_COMPRESS_PROGRAM, DEFAULT_DECOMPRESS_PROGRAM};
use crate::common::archive::tar::{DEFAULT_FORMAT, DEFAULT_TAR_PROGRAM};
use crate::common::fs::io::read_file_to_string;
use crate::core::error::{ConfigError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Archive formats accepted for `tools.format` (GNU and bsdtar `--format` names).
pub const SUPPORTED_FORMATS: [&str; 6] = ["gnu", "oldgnu", "pax", "posix", "ustar", "v7"];

const PROJECT_CONFIG_FILENAME: &str = ".tarx.toml";

/// Environment variable naming an explicit user configuration file.
pub const CONFIG_ENV_VAR: &str = "TARX_CONFIG";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// External programs and archive format.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Archiver program name or path (can use ~).
    #[serde(default = "default_tar_program")]
    pub tar_program: String,
    /// Value passed to `--format` when creating archives.
    #[serde(default = "default_format")]
    pub format: String,
    /// Compressor, optionally with arguments (e.g. "xz -9").
    #[serde(default = "default_compress_program")]
    pub compress_program: String,
    /// Decompressor, optionally with arguments.
    #[serde(default = "default_decompress_program")]
    pub decompress_program: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            tar_program: default_tar_program(),
            format: default_format(),
            compress_program: default_compress_program(),
            decompress_program: default_decompress_program(),
        }
    }
}

fn default_tar_program() -> String {
    DEFAULT_TAR_PROGRAM.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_compress_program() -> String {
    DEFAULT_COMPRESS_PROGRAM.to_string()
}
fn default_decompress_program() -> String {
    DEFAULT_DECOMPRESS_PROGRAM.to_string()
}

impl Config {
    /// Replaces the archiver and format with command-line values, when given,
    /// then re-validates.
    pub fn apply_overrides(
        &mut self,
        tar_program: Option<String>,
        format: Option<String>,
    ) -> Result<()> {
        if let Some(program) = tar_program {
            debug!("Overriding tar program from command line: {}", program);
            self.tools.tar_program = shellexpand::tilde(&program).into_owned();
        }
        if let Some(format) = format {
            debug!("Overriding archive format from command line: {}", format);
            self.tools.format = format;
        }
        validate_config(self)
    }
}

/// Loads, merges, expands and validates configuration for the current directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_from(&current_dir)
}

/// Like `load_config`, but searches for the project file starting at `start_dir`.
pub fn load_config_from(start_dir: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config(start_dir)?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn user_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(explicit));
    }
    match ProjectDirs::from("", "", "tarx") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().join("config.toml")),
        None => {
            warn!("Could not determine user config directory.");
            None
        }
    }
}

fn load_user_config() -> Result<Option<Config>> {
    let config_path = match user_config_path() {
        Some(path) => path,
        None => return Ok(None),
    };
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_project_config(start_dir: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.tarx.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path = start_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = read_file_to_string(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let pick = |project: String, user: String, default: String| {
        if project != default {
            project
        } else {
            user
        }
    };
    Config {
        tools: ToolsConfig {
            tar_program: pick(
                project_cfg.tools.tar_program,
                user.tools.tar_program,
                default_tar_program(),
            ),
            format: pick(project_cfg.tools.format, user.tools.format, default_format()),
            compress_program: pick(
                project_cfg.tools.compress_program,
                user.tools.compress_program,
                default_compress_program(),
            ),
            decompress_program: pick(
                project_cfg.tools.decompress_program,
                user.tools.decompress_program,
                default_decompress_program(),
            ),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    config.tools.tar_program = shellexpand::tilde(&config.tools.tar_program).into_owned();
    config.tools.compress_program = shellexpand::tilde(&config.tools.compress_program).into_owned();
    config.tools.decompress_program =
        shellexpand::tilde(&config.tools.decompress_program).into_owned();
    debug!("Expanded tool paths: {:?}", config.tools);
}

fn validate_config(config: &Config) -> Result<()> {
    let tools = &config.tools;
    for (key, value) in [
        ("tools.tar_program", &tools.tar_program),
        ("tools.compress_program", &tools.compress_program),
        ("tools.decompress_program", &tools.decompress_program),
    ] {
        if value.trim().is_empty() {
            return Err(anyhow!(ConfigError::Invalid(format!(
                "{} must not be empty.",
                key
            ))));
        }
    }
    if !SUPPORTED_FORMATS.contains(&tools.format.as_str()) {
        return Err(anyhow!(ConfigError::Invalid(format!(
            "Unsupported archive format '{}'. Expected one of: {}.",
            tools.format,
            SUPPORTED_FORMATS.join(", ")
        ))));
    }
    debug!("Configuration validation successful.");
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [tools]
            tar_program = "gtar"
            compress_program = "bzip2 -9"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.tools.tar_program, "gtar");
        assert_eq!(config.tools.compress_program, "bzip2 -9");
        assert_eq!(config.tools.format, "pax"); // Default
        assert_eq!(config.tools.decompress_program, "gunzip"); // Default
    }

    #[test]
    fn test_deserialize_empty_and_unknown() {
        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty, Config::default());

        assert!(toml::from_str::<Config>("[tools]\nzip_program = \"zip\"\n").is_err());
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user = Config {
            tools: ToolsConfig {
                tar_program: "/usr/local/bin/gtar".into(),
                compress_program: "xz".into(),
                ..Default::default()
            },
        };
        let project = Config {
            tools: ToolsConfig {
                compress_program: "bzip2".into(),
                format: "ustar".into(),
                ..Default::default()
            },
        };
        let merged = merge_configs(user.clone(), Some(project));
        assert_eq!(merged.tools.tar_program, "/usr/local/bin/gtar"); // From user
        assert_eq!(merged.tools.compress_program, "bzip2"); // From project
        assert_eq!(merged.tools.format, "ustar");
        assert_eq!(merged.tools.decompress_program, "gunzip");

        assert_eq!(merge_configs(user.clone(), None), user);
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            tools: ToolsConfig {
                tar_program: "~/bin/gtar".into(),
                compress_program: "/usr/bin/gzip -f".into(),
                ..Default::default()
            },
        };
        expand_config_paths(&mut config);

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.tools.tar_program,
            home_dir.join("bin/gtar").to_string_lossy()
        );
        assert_eq!(config.tools.compress_program, "/usr/bin/gzip -f");
    }

    #[test]
    fn test_validate_config() {
        assert!(validate_config(&Config::default()).is_ok());

        let mut bad_format = Config::default();
        bad_format.tools.format = "zip".into();
        let err = validate_config(&bad_format).unwrap_err();
        assert!(err.to_string().contains("Unsupported archive format 'zip'"));
        assert!(err.downcast_ref::<ConfigError>().is_some());

        let mut empty_program = Config::default();
        empty_program.tools.compress_program = "  ".into();
        assert!(validate_config(&empty_program)
            .unwrap_err()
            .to_string()
            .contains("tools.compress_program must not be empty"));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(Some("bsdtar".into()), Some("ustar".into()))
            .unwrap();
        assert_eq!(config.tools.tar_program, "bsdtar");
        assert_eq!(config.tools.format, "ustar");

        assert!(config.apply_overrides(None, Some("cpio".into())).is_err());
    }

    #[test]
    fn test_find_project_config_walks_up_to_git_root() {
        let root = tempdir().unwrap();
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();

        assert!(find_project_config_path(&nested).is_none());

        fs::write(root.path().join("a").join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(root.path().join("a").join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_load_project_config_file() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        fs::write(
            root.path().join(PROJECT_CONFIG_FILENAME),
            "[tools]\nformat = \"gnu\"\n",
        )
        .unwrap();
        let loaded = load_project_config(root.path()).unwrap().unwrap();
        assert_eq!(loaded.tools.format, "gnu");

        fs::write(root.path().join(PROJECT_CONFIG_FILENAME), "[tools\n").unwrap();
        assert!(load_project_config(root.path()).is_err());
    }
}
