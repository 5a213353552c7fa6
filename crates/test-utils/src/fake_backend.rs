use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use pkgowner::errors::Result;
use pkgowner::exec::{display_command, CommandBackend, ExecOptions, ProcessHandle};

/// One call seen by [`RecordingBackend`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub options: ExecOptions,
}

/// A fake backend that:
/// - records every command it is asked to run
/// - answers each one with the same canned stdout and exit code, without
///   spawning anything.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    stdout: String,
    exit_code: i32,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingBackend {
    pub fn new(stdout: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            exit_code,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared view of the recorded calls; stays valid after the backend has
    /// been moved into a resolver.
    pub fn calls(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
        Arc::clone(&self.calls)
    }
}

impl CommandBackend for RecordingBackend {
    fn run_argv<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
        options: ExecOptions,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessHandle>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(RecordedCall {
                program: program.to_string(),
                args: args.to_vec(),
                options,
            });

            Ok(ProcessHandle::finished(
                display_command(program, args),
                self.exit_code,
                Some(self.stdout.clone().into_bytes()),
            ))
        })
    }
}
