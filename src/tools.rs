// src/tools.rs

//! Locating the external executables a resolver depends on.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use crate::errors::{PkgownerError, Result};

/// Executable name → invocable path.
///
/// Keys are the names components ask for (`"dpkg-query"`), values are what
/// to actually execute. Entries double as template substitutions, so a
/// template can say `{dpkg-query} -S {files}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolPaths {
    paths: BTreeMap<String, String>,
}

impl ToolPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.paths.insert(name.into(), path.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing entry is a
    /// [`PkgownerError::MissingExecutable`].
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| PkgownerError::MissingExecutable(name.to_string()))
    }

    pub fn substitutions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Find every executable in `names`.
///
/// An entry in `overrides` replaces the `PATH` lookup for that name; it may be
/// an absolute path or another command name. The first name that cannot be
/// found fails the whole lookup.
pub fn require_executables(
    names: &[&str],
    overrides: &BTreeMap<String, PathBuf>,
) -> Result<ToolPaths> {
    let mut tools = ToolPaths::new();

    for &name in names {
        let candidate = overrides
            .get(name)
            .map(|p| p.as_os_str().to_owned())
            .unwrap_or_else(|| name.into());

        let path = which::which(&candidate)
            .map_err(|_| PkgownerError::MissingExecutable(name.to_string()))?;
        debug!(tool = name, path = %path.display(), "located executable");

        tools = tools.with(name, path.to_string_lossy().into_owned());
    }

    Ok(tools)
}
