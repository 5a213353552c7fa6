// src/resolve/parser.rs

//! Parser for `dpkg-query -S` output.
//!
//! Each line has the shape `<package-spec>: <file-path>`, where the package
//! spec is either a comma-separated list of package names or
//! `diversion by <names> (to|from) <path>`:
//!
//! ```text
//! coreutils: /bin/ls
//! libc6:amd64, libc6:i386: /usr/share/doc/libc6
//! diversion by libfoo to /usr/lib/libfoo.so.real: /usr/lib/libfoo.so
//! ```
//!
//! The parser is pure. Anything worth reporting is handed to a caller-supplied
//! sink as a [`ParseEvent`]; [`parse_query_output`] uses a sink that forwards
//! to `tracing`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::ResolutionMap;

static DIVERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^diversion by (.+?) (?:to|from)").expect("diversion pattern is valid")
});

/// Something the parser noticed while walking the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent<'a> {
    /// A line without the `": "` separator; it was skipped.
    Malformed { line_no: usize, line: &'a str },
    /// A diversion spec was reduced to the package names it names.
    Diversion { names: &'a str },
    /// `file` was recorded as owned by `package`.
    Mapped { file: &'a str, package: &'a str },
}

/// Parse the tool output, reporting events to `tracing`.
pub fn parse_query_output(stdout: &str) -> ResolutionMap {
    parse_query_output_with(stdout, trace_event)
}

/// Parse the tool output, reporting events to `sink`.
///
/// When several names (on one line or across lines) claim the same file, the
/// last one wins. Names are not filtered: `pkg-a, : /x` leaves `/x` owned by
/// `""`. Blank lines are malformed.
pub fn parse_query_output_with<'a, F>(stdout: &'a str, mut sink: F) -> ResolutionMap
where
    F: FnMut(ParseEvent<'a>),
{
    let mut results = ResolutionMap::new();

    for (idx, line) in stdout.lines().enumerate() {
        let Some((spec, file)) = line.split_once(": ") else {
            sink(ParseEvent::Malformed {
                line_no: idx + 1,
                line,
            });
            continue;
        };

        let names = match diversion_names(spec) {
            Some(names) => {
                sink(ParseEvent::Diversion { names });
                names
            }
            None => spec.trim(),
        };

        for package in names.split(',').map(str::trim) {
            results.insert(file.to_string(), package.to_string());
            sink(ParseEvent::Mapped { file, package });
        }
    }

    results
}

/// Reduce a package spec to its comma-separated package names.
///
/// `diversion by <names> to <path>` (or `from`) yields `<names>`; anything
/// else is returned trimmed.
pub fn extract_package_names(spec: &str) -> &str {
    diversion_names(spec).unwrap_or_else(|| spec.trim())
}

fn diversion_names(spec: &str) -> Option<&str> {
    DIVERSION
        .captures(spec)
        .and_then(|caps| caps.get(1))
        .map(|names| names.as_str().trim())
}

fn trace_event(event: ParseEvent<'_>) {
    match event {
        ParseEvent::Malformed { line_no, line } => {
            warn!(line_no, line, "line format unexpected, skipping");
        }
        ParseEvent::Diversion { names } => {
            debug!(names, "extracted package names from diversion");
        }
        ParseEvent::Mapped { file, package } => {
            debug!(file, package, "mapped file to package");
        }
    }
}
