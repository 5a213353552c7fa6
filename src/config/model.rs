// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [exec]
/// timeout_secs = 6000
///
/// [tools]
/// dpkg-query = "/usr/bin/dpkg-query"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// Process execution settings from `[exec]`.
    #[serde(default)]
    pub exec: ExecSection,

    /// Explicit executable locations from `[tools]`, keyed by tool name.
    ///
    /// Tools not listed here are looked up on `PATH`.
    #[serde(default)]
    pub tools: BTreeMap<String, PathBuf>,
}

/// `[exec]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecSection {
    /// How long to wait for a query process before killing it, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    6000
}

impl Default for ExecSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (or `Default`), so holding
/// one means the invariants in `validate.rs` hold.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub exec: ExecSection,
    pub tools: BTreeMap<String, PathBuf>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(exec: ExecSection, tools: BTreeMap<String, PathBuf>) -> Self {
        Self { exec, tools }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.exec.timeout_secs)
    }
}
