// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `coursetex`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "coursetex",
    version,
    about = "Incrementally build lesson, exercise and solution PDFs for a semester of course material.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Coursetex.toml` in the current working directory.
    #[arg(short = 'c', long, value_name = "PATH", default_value = "Coursetex.toml")]
    pub config: String,

    /// Working directory the semester root is resolved against.
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub workdir: PathBuf,

    /// Stop processing further units after the first unit failure.
    ///
    /// By default the run continues through every configured unit and only
    /// the exit code reflects failures.
    #[arg(long)]
    pub fail_fast: bool,

    /// Parse + validate the config, print the units and targets, but don't
    /// compile anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `COURSETEX_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
