// src/exec/command.rs

//! The command executor.
//!
//! [`run`] takes a [`CommandSpec`], renders it, splits it into arguments with
//! POSIX shell quoting rules and launches the result. [`run_argv`] skips the
//! template/tokenize step and launches an argument vector directly; callers
//! that build commands from untrusted strings (file paths, for instance)
//! should use it so that nothing is ever re-split.
//!
//! Neither function goes through a shell. stdin and stderr are inherited from
//! the calling process; stdout goes wherever [`OutputTarget`] says.

use std::borrow::Cow;
use std::fs::File;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::errors::{PkgownerError, Result};
use crate::exec::template::CommandSpec;

/// Default bound on how long to wait for a command to exit.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6000);

/// Where the child's standard output goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Share the caller's stdout.
    #[default]
    Inherit,
    /// Collect stdout into memory; readable from the [`ProcessHandle`] after
    /// waiting.
    Capture,
    /// Write stdout to a file (created or truncated).
    File(PathBuf),
}

/// Knobs for a single command execution.
#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub stdout: OutputTarget,
    /// Fail with [`PkgownerError::CommandExecution`] on a non-zero exit.
    /// Only checked when `wait` is set; otherwise use
    /// [`ProcessHandle::assert_success`] after [`ProcessHandle::wait`].
    pub assert_success: bool,
    /// Block until the process exits (or `timeout` elapses).
    pub wait: bool,
    pub timeout: Duration,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            stdout: OutputTarget::Inherit,
            assert_success: true,
            wait: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ExecOptions {
    pub fn stdout(mut self, target: OutputTarget) -> Self {
        self.stdout = target;
        self
    }

    pub fn assert_success(mut self, assert: bool) -> Self {
        self.assert_success = assert;
        self
    }

    pub fn wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A launched (and possibly finished) command.
///
/// The exit code is only known once the process has been waited on.
/// Dropping a handle whose process is still running leaves the process
/// running.
#[derive(Debug)]
pub struct ProcessHandle {
    command: String,
    child: Option<Child>,
    captured: bool,
    exit_code: Option<i32>,
    stdout: Option<Vec<u8>>,
}

impl ProcessHandle {
    /// Build a handle for a process that has already exited.
    ///
    /// Used by non-process backends (tests, replays) to hand back results in
    /// the same shape as a real execution.
    pub fn finished(command: impl Into<String>, exit_code: i32, stdout: Option<Vec<u8>>) -> Self {
        Self {
            command: command.into(),
            child: None,
            captured: stdout.is_some(),
            exit_code: Some(exit_code),
            stdout,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    /// `None` until the process has been waited on.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Captured stdout; `None` unless the target was [`OutputTarget::Capture`]
    /// and the process has been waited on.
    pub fn stdout(&self) -> Option<&[u8]> {
        self.stdout.as_deref()
    }

    /// Captured stdout decoded as UTF-8, replacing invalid sequences.
    pub fn stdout_text(&self) -> Option<Cow<'_, str>> {
        self.stdout.as_deref().map(String::from_utf8_lossy)
    }

    /// Wait for the process to exit, collecting captured stdout.
    ///
    /// On timeout the process and everything it spawned are killed, and
    /// [`PkgownerError::Timeout`] is returned. Waiting on an already finished
    /// handle returns the recorded exit code.
    pub async fn wait(&mut self, timeout: Duration) -> Result<i32> {
        if let Some(code) = self.exit_code {
            return Ok(code);
        }
        let Some(child) = self.child.as_mut() else {
            return Err(PkgownerError::Other(anyhow::anyhow!(
                "process handle for \"{}\" has no child to wait on",
                self.command
            )));
        };

        // Drain the pipe while waiting so a chatty child never blocks on a
        // full buffer.
        let pipe = child.stdout.take();
        let collect = async move {
            let mut buf = Vec::new();
            if let Some(mut pipe) = pipe {
                pipe.read_to_end(&mut buf).await?;
            }
            Ok::<_, std::io::Error>(buf)
        };

        let waited =
            tokio::time::timeout(timeout, async { tokio::try_join!(child.wait(), collect) }).await;

        let (status, stdout) = match waited {
            Ok(res) => res?,
            Err(_) => {
                if let Err(e) = kill_process_group(child).await {
                    warn!(command = %self.command, error = %e, "failed to kill timed-out process");
                }
                self.child = None;
                return Err(PkgownerError::Timeout {
                    command: self.command.clone(),
                    timeout,
                });
            }
        };
        self.child = None;

        let code = status.code().unwrap_or(-1);
        debug!(
            command = %self.command,
            exit_code = code,
            success = status.success(),
            "process exited"
        );

        self.exit_code = Some(code);
        if self.captured {
            self.stdout = Some(stdout);
        }
        Ok(code)
    }

    /// Fail if the process exited with a non-zero code.
    ///
    /// A handle that has not been waited on passes.
    pub fn assert_success(&self) -> Result<()> {
        match self.exit_code {
            Some(code) if code != 0 => Err(PkgownerError::CommandExecution {
                command: self.command.clone(),
                code,
            }),
            _ => Ok(()),
        }
    }
}

/// Render `spec`, split it into arguments and execute it.
pub async fn run(spec: &CommandSpec, options: ExecOptions) -> Result<ProcessHandle> {
    let command = spec.render()?;
    debug!(command = %command, "running command");

    let argv = tokenize(&command)?;
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| PkgownerError::CommandTokenize(command.clone()))?;

    launch(command, program, args, options).await
}

/// Execute `program` with `args` as-is.
pub async fn run_argv(
    program: &str,
    args: &[String],
    options: ExecOptions,
) -> Result<ProcessHandle> {
    let command = display_command(program, args);
    debug!(command = %command, "running command");

    launch(command, program, args, options).await
}

/// Split a command line using POSIX shell word-splitting and quoting.
pub fn tokenize(command: &str) -> Result<Vec<String>> {
    match shlex::split(command) {
        Some(argv) if !argv.is_empty() => Ok(argv),
        _ => Err(PkgownerError::CommandTokenize(command.to_string())),
    }
}

/// Shell-quoted rendering of an argument vector, for logs and error messages.
pub fn display_command(program: &str, args: &[String]) -> String {
    let words = std::iter::once(program).chain(args.iter().map(String::as_str));
    shlex::try_join(words.clone()).unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "))
}

async fn launch(
    command: String,
    program: &str,
    args: &[String],
    options: ExecOptions,
) -> Result<ProcessHandle> {
    let stdout = match &options.stdout {
        OutputTarget::Inherit => Stdio::inherit(),
        OutputTarget::Capture => Stdio::piped(),
        OutputTarget::File(path) => {
            let file = File::create(path).map_err(|source| PkgownerError::CommandSpawn {
                command: command.clone(),
                source,
            })?;
            Stdio::from(file)
        }
    };

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stdout(stdout)
        .stderr(Stdio::inherit());
    // Own process group, so a timeout can take down everything the command
    // forked along with it.
    #[cfg(unix)]
    cmd.process_group(0);

    let child = cmd.spawn().map_err(|source| PkgownerError::CommandSpawn {
        command: command.clone(),
        source,
    })?;

    let mut handle = ProcessHandle {
        command,
        child: Some(child),
        captured: options.stdout == OutputTarget::Capture,
        exit_code: None,
        stdout: None,
    };

    if options.wait {
        handle.wait(options.timeout).await?;
        if options.assert_success {
            handle.assert_success()?;
        }
    }

    Ok(handle)
}

/// SIGKILL the child's process group and reap the child.
#[cfg(unix)]
async fn kill_process_group(child: &mut Child) -> std::io::Result<()> {
    if let Some(pgid) = child.id().and_then(|pid| i32::try_from(pid).ok()) {
        // SAFETY: killpg takes plain integers; the group id is the child's
        // pid because it was spawned with `process_group(0)`.
        if unsafe { libc::killpg(pgid, libc::SIGKILL) } == 0 {
            child.wait().await?;
            return Ok(());
        }
    }
    child.kill().await
}

#[cfg(not(unix))]
async fn kill_process_group(child: &mut Child) -> std::io::Result<()> {
    child.kill().await
}
