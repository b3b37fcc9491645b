// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `reloadwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "reloadwatch",
    version,
    about = "Refresh live browser sessions when project files change.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Reloadwatch.toml` in the current working directory. A
    /// missing default file is not an error; all settings fall back to
    /// their defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Directory to watch. Defaults to the current working directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// Shell command run as a "browser refresh" on every detected change.
    ///
    /// May be given multiple times; appended to `[session].refresh_cmd`.
    #[arg(long = "refresh-cmd", value_name = "CMD")]
    pub refresh_cmd: Vec<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RELOADWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve ignore patterns, print them, and exit without watching.
    #[arg(long)]
    pub dry_run: bool,
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
