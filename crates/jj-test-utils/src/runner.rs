//! In-memory command runner.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use jj_command::{CommandLine, CommandRunner, ExecutionResult};

/// One recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub command: CommandLine,
    pub working_dir: PathBuf,
}

impl Call {
    /// The raw argument vector of the recorded command.
    pub fn argv(&self) -> Vec<String> {
        self.command.argv().map(str::to_string).collect()
    }
}

type Responder = Box<dyn Fn(&CommandLine) -> ExecutionResult + Send + Sync>;

/// Runner that records every call and answers from a responder closure.
///
/// The default responder answers every command with empty stdout.
pub struct RecordingRunner {
    calls: Mutex<Vec<Call>>,
    responder: Responder,
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::with_responder(|command| ExecutionResult::success(command.to_string(), "", ""))
    }

    /// Answer every command with `stdout`.
    pub fn with_stdout(stdout: &str) -> Self {
        let stdout = stdout.to_string();
        Self::with_responder(move |command| {
            ExecutionResult::success(command.to_string(), stdout.clone(), "")
        })
    }

    /// Answer every command with a failure.
    pub fn failing(reason: &str, stderr: &str) -> Self {
        let reason = reason.to_string();
        let stderr = stderr.to_string();
        Self::with_responder(move |command| {
            ExecutionResult::failed(command.to_string(), reason.clone())
                .with_output("", stderr.clone())
        })
    }

    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&CommandLine) -> ExecutionResult + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    /// Argument vector of the only recorded call.
    ///
    /// # Panics
    /// Panics unless exactly one call was recorded.
    pub fn single_argv(&self) -> Vec<String> {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls[0].argv()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn execute(&self, command: &CommandLine, working_dir: &Path) -> ExecutionResult {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Call {
                command: command.clone(),
                working_dir: working_dir.to_path_buf(),
            });
        (self.responder)(command)
    }
}
