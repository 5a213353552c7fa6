// src/errors.rs

//! Crate-wide error type and `Result` alias.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PkgownerError {
    #[error("Required executable not found: {0}")]
    MissingExecutable(String),

    #[error("Command template '{template}' is invalid: {reason}")]
    CommandFormat { template: String, reason: String },

    #[error("Command could not be split into arguments: {0}")]
    CommandTokenize(String),

    #[error("Failed to launch \"{command}\": {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("\"{command}\" execution failed with code {code}")]
    CommandExecution { command: String, code: i32 },

    #[error("\"{command}\" did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PkgownerError>;
