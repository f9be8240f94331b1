//! # tarx Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `tarx` binary, a thin
//! command-line front end over the `tar_external` library. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and applying command-line overrides
//! - Routing execution to the matching command handler
//!
//! ## Examples
//!
//! ```bash
//! # Create an archive from a pattern and gzip it
//! tarx create backup.tar '*.conf' --compress
//!
//! # List members with debug logging of the underlying commands
//! tarx -vv list backup.tar
//!
//! # Unpack a compressed archive made elsewhere
//! tarx decompress release.tgz && tarx extract release.tar --to out
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration and apply `--tar-program` / `--format`
//! 4. Route to the command handler
//! 5. Print any error and exit with status 1
//!
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tar_external::core::config;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "tarx",
    about = "Create, inspect and compress tar archives through the system's tar and gzip tools",
    long_about = "Runs the external archiver and compressor programs for you and reports\n\
                  their failures. Program names come from .tarx.toml, the user config file,\n\
                  or the flags below.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Archiver program to run instead of the configured one.
    #[arg(long, global = true, env = "TARX_TAR_PROGRAM")]
    tar_program: Option<String>,
    /// Archive format passed to `--format` on create (gnu, oldgnu, pax, posix, ustar, v7).
    #[arg(long, global = true, env = "TARX_FORMAT")]
    format: Option<String>,
    /// Run every command in this directory.
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    directory: Option<PathBuf>,
}

/// Enum defining all available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(alias = "c")]
    Create(commands::create::CreateArgs),
    #[command(alias = "t", alias = "info")]
    List(commands::list::ListArgs),
    #[command(alias = "r")]
    Add(commands::add::AddArgs),
    #[command(alias = "u")]
    Update(commands::update::UpdateArgs),
    #[command(alias = "x", alias = "expand")]
    Extract(commands::extract::ExtractArgs),
    Compress(commands::compress::CompressArgs),
    #[command(alias = "uncompress")]
    Decompress(commands::decompress::DecompressArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = run(cli);

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = config::load_config()?;
    cfg.apply_overrides(cli.tar_program, cli.format)?;
    let ctx = commands::AppContext::new(cfg, cli.directory);

    match cli.command {
        Commands::Create(args) => commands::create::handle_create(args, &ctx),
        Commands::List(args) => commands::list::handle_list(args, &ctx),
        Commands::Add(args) => commands::add::handle_add(args, &ctx),
        Commands::Update(args) => commands::update::handle_update(args, &ctx),
        Commands::Extract(args) => commands::extract::handle_extract(args, &ctx),
        Commands::Compress(args) => commands::compress::handle_compress(args, &ctx),
        Commands::Decompress(args) => commands::decompress::handle_decompress(args, &ctx),
    }
}
