// src/resolve/mod.rs

//! File → owning package resolution.
//!
//! - [`parser`] turns raw `dpkg-query -S` output into a [`ResolutionMap`].
//! - [`dpkg`] builds the batched query, runs it and parses the result.
//!
//! Other package managers fit behind the same [`FileOwnerResolver`] trait;
//! querying several of them is up to the caller.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

pub mod dpkg;
pub mod parser;

pub use dpkg::DpkgFileResolver;
pub use parser::{extract_package_names, parse_query_output, parse_query_output_with, ParseEvent};

/// File path (as reported by the package tool) → owning package name.
pub type ResolutionMap = BTreeMap<String, String>;

/// Something that can tell which package owns a set of files.
pub trait FileOwnerResolver: Send + Sync {
    /// Resolve owners for `files` in one round-trip.
    ///
    /// Files without an owner are absent from the returned map.
    fn resolve<'a>(
        &'a self,
        files: &'a BTreeSet<String>,
    ) -> Pin<Box<dyn Future<Output = Result<ResolutionMap>> + Send + 'a>>;
}

/// Input paths that have no entry in `resolved`.
///
/// The package tool may report a path in a different form than it was asked
/// for, so this is a literal comparison.
pub fn unresolved<'a>(files: &'a BTreeSet<String>, resolved: &ResolutionMap) -> Vec<&'a str> {
    files
        .iter()
        .filter(|f| !resolved.contains_key(f.as_str()))
        .map(String::as_str)
        .collect()
}
