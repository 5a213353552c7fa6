// src/logging.rs

//! Subscriber setup. The resolved owners go to stdout, so every log line
//! goes to stderr.
//!
//! An explicit `--log-level` wins. Otherwise `PKGOWNER_LOG` is read as an
//! `EnvFilter` directive string (`debug`, `pkgowner::exec=trace,warn`, ...),
//! falling back to `info`.

use anyhow::Result;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "PKGOWNER_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(filter_for(cli_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))
}

fn filter_for(cli_level: Option<LogLevel>) -> EnvFilter {
    match cli_level {
        Some(level) => {
            let level = LevelFilter::from(tracing::Level::from(level));
            EnvFilter::default().add_directive(level.into())
        }
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .with_env_var(LOG_ENV)
            .from_env_lossy(),
    }
}
