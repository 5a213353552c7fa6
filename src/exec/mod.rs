// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`template`] renders `{name}` command templates ([`CommandSpec`]).
//! - [`command`] launches commands with `tokio::process::Command`, bounded by
//!   a timeout, and optionally asserts a zero exit code.
//! - [`backend`] provides the `CommandBackend` trait and the production
//!   `TokioCommandBackend`, which tests can replace with a fake.

pub mod backend;
pub mod command;
pub mod template;

pub use backend::{CommandBackend, TokioCommandBackend};
pub use command::{
    display_command, run, run_argv, tokenize, ExecOptions, OutputTarget, ProcessHandle,
    DEFAULT_TIMEOUT,
};
pub use template::CommandSpec;
