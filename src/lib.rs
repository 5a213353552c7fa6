// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod resolve;
pub mod tools;

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::resolve::dpkg::REQUIRED_TOOLS;
use crate::resolve::{unresolved, DpkgFileResolver, ResolutionMap};
use crate::tools::require_executables;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - executable lookup
/// - the dpkg resolver
/// - printing the result to stdout
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;
    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| cfg.timeout());

    let tools = require_executables(REQUIRED_TOOLS, &cfg.tools)?;
    let resolver = DpkgFileResolver::new(&tools, timeout)?;

    let files: BTreeSet<String> = args.paths.into_iter().collect();

    if args.dry_run {
        println!("{}", resolver.command_line(&files));
        debug!("dry-run complete (no execution)");
        return Ok(());
    }

    let owners = resolver.resolve(&files).await?;
    let unowned = unresolved(&files, &owners);
    info!(
        requested = files.len(),
        resolved = owners.len(),
        unowned = unowned.len(),
        "resolution finished"
    );

    let unowned = args.show_unowned.then_some(unowned.as_slice());
    print!("{}", render_owners(&owners, unowned));
    Ok(())
}

/// One `<path>\t<package>` line per entry, sorted by path.
///
/// With `unowned`, those paths are added as `<path>\t-`.
pub fn render_owners(owners: &ResolutionMap, unowned: Option<&[&str]>) -> String {
    let mut rows: Vec<(&str, &str)> = owners
        .iter()
        .map(|(file, pkg)| (file.as_str(), pkg.as_str()))
        .collect();
    if let Some(unowned) = unowned {
        rows.extend(unowned.iter().map(|file| (*file, "-")));
        rows.sort_unstable();
    }

    let mut out = String::new();
    for (file, pkg) in rows {
        let _ = writeln!(out, "{file}\t{pkg}");
    }
    out
}
