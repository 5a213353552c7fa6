// src/resolve/dpkg.rs

//! Resolve which deb packages provide a given file using `dpkg-query -S`.

use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::{
    display_command, CommandBackend, ExecOptions, OutputTarget, TokioCommandBackend,
};
use crate::resolve::parser::parse_query_output;
use crate::resolve::{FileOwnerResolver, ResolutionMap};
use crate::tools::ToolPaths;

/// Executables that must be present in the [`ToolPaths`] handed to a
/// [`DpkgFileResolver`].
pub const REQUIRED_TOOLS: &[&str] = &["dpkg-query"];

/// Resolver backed by the dpkg database.
#[derive(Debug, Clone)]
pub struct DpkgFileResolver<B = TokioCommandBackend> {
    dpkg_query: String,
    timeout: Duration,
    backend: B,
}

impl DpkgFileResolver {
    /// Fails with `MissingExecutable` if `tools` has no `dpkg-query`.
    pub fn new(tools: &ToolPaths, timeout: Duration) -> Result<Self> {
        Self::with_backend(tools, timeout, TokioCommandBackend)
    }
}

impl<B: CommandBackend> DpkgFileResolver<B> {
    pub fn with_backend(tools: &ToolPaths, timeout: Duration, backend: B) -> Result<Self> {
        let dpkg_query = tools.require("dpkg-query")?.to_string();
        Ok(Self {
            dpkg_query,
            timeout,
            backend,
        })
    }

    pub fn program(&self) -> &str {
        &self.dpkg_query
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Arguments for a single batched query: `-S <file>...`.
    pub fn query_args(&self, files: &BTreeSet<String>) -> Vec<String> {
        std::iter::once("-S".to_string())
            .chain(files.iter().cloned())
            .collect()
    }

    /// The query as a shell-quoted command line.
    pub fn command_line(&self, files: &BTreeSet<String>) -> String {
        display_command(&self.dpkg_query, &self.query_args(files))
    }

    /// Map each of `files` to its owning package.
    ///
    /// The query's exit code is not checked: dpkg-query exits non-zero as
    /// soon as one path is unowned, and the owned ones are still listed on
    /// stdout.
    pub async fn resolve(&self, files: &BTreeSet<String>) -> Result<ResolutionMap> {
        if files.is_empty() {
            debug!("no files to resolve");
            return Ok(ResolutionMap::new());
        }

        let args = self.query_args(files);
        info!(
            tool = %self.dpkg_query,
            files = files.len(),
            "querying package database"
        );

        let options = ExecOptions::default()
            .stdout(OutputTarget::Capture)
            .assert_success(false)
            .wait(true)
            .timeout(self.timeout);
        let handle = self.backend.run_argv(&self.dpkg_query, &args, options).await?;

        if let Some(code) = handle.exit_code().filter(|&c| c != 0) {
            debug!(
                command = %handle.command(),
                exit_code = code,
                "dpkg-query reported unowned paths"
            );
        }

        let stdout = handle.stdout_text().unwrap_or_default();
        let results = parse_query_output(&stdout);

        debug!(
            requested = files.len(),
            resolved = results.len(),
            "finished parsing dpkg-query output"
        );
        Ok(results)
    }
}

impl<B: CommandBackend> FileOwnerResolver for DpkgFileResolver<B> {
    fn resolve<'a>(
        &'a self,
        files: &'a BTreeSet<String>,
    ) -> Pin<Box<dyn Future<Output = Result<ResolutionMap>> + Send + 'a>> {
        Box::pin(Self::resolve(self, files))
    }
}
