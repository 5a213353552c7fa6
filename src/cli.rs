// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `pkgowner`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pkgowner",
    version,
    about = "Show which installed Debian package owns each file.",
    long_about = None
)]
pub struct CliArgs {
    /// Files to look up.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Path to the config file (TOML).
    ///
    /// If omitted, `Pkgowner.toml` in the current working directory is used
    /// when it exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seconds to wait for dpkg-query before giving up.
    ///
    /// Overrides `[exec].timeout_secs`.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PKGOWNER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the query command, but don't run it.
    #[arg(long)]
    pub dry_run: bool,

    /// Also list requested paths that no package owns.
    #[arg(long)]
    pub show_unowned: bool,
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

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
