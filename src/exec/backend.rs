// src/exec/backend.rs

//! Pluggable command backend abstraction.
//!
//! Resolvers talk to a `CommandBackend` instead of calling
//! [`run_argv`](super::command::run_argv) directly. This makes it easy to swap
//! in a fake backend in tests while keeping the production executor in
//! [`command`](super::command).
//!
//! - `TokioCommandBackend` is the default implementation. It launches real
//!   processes with `tokio::process`.
//! - Tests can provide their own `CommandBackend` that, for example, records
//!   which commands were requested and hands back canned stdout.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::command::{run_argv, ExecOptions, ProcessHandle};

/// Trait abstracting how a command is executed.
pub trait CommandBackend: Send + Sync {
    /// Execute `program` with `args` according to `options`.
    fn run_argv<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
        options: ExecOptions,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessHandle>> + Send + 'a>>;
}

/// Backend that spawns OS processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandBackend;

impl CommandBackend for TokioCommandBackend {
    fn run_argv<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
        options: ExecOptions,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessHandle>> + Send + 'a>> {
        Box::pin(run_argv(program, args, options))
    }
}
