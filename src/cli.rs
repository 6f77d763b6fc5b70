// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchfs`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchfs",
    version,
    about = "Run actions when watched files are created, modified, or deleted.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (JSON).
    ///
    /// Default: `watchfs.json` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "watchfs.json")]
    pub config: String,

    /// Milliseconds between checks.
    #[arg(long, value_name = "MILLIS", default_value_t = 1000)]
    pub interval_ms: u64,

    /// Run a single check and exit instead of polling.
    #[arg(long)]
    pub once: bool,

    /// Parse + validate the config, print the registrations, but don't watch
    /// or execute anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHFS_LOG` or a default level will be used.
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
