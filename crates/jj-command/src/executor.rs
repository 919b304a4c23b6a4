//! Execution of `jj` command lines
//!
//! [`CommandRunner`] is the seam between operations and the subprocess. Its
//! contract is "always returns a result, never an error": spawn failures,
//! non-zero exits and timeouts all become an [`ExecutionResult`] whose
//! `failure` is set, so a failing command can never take the server down.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::command::CommandLine;
use crate::Error;

/// How the executor hands a [`CommandLine`] to the operating system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecMode {
    /// Spawn the binary with the argument vector; no shell is involved
    #[default]
    Direct,
    /// Run the rendered script through `sh -c` (POSIX only)
    Shell,
}

impl fmt::Display for ExecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecMode::Direct => write!(f, "direct"),
            ExecMode::Shell => write!(f, "shell"),
        }
    }
}

impl FromStr for ExecMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(ExecMode::Direct),
            "shell" => Ok(ExecMode::Shell),
            _ => Err(Error::UnknownExecMode(s.to_string())),
        }
    }
}

/// Settings for [`JjExecutor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Binary to run (looked up on `PATH` when not a path)
    pub binary: PathBuf,
    /// Direct argv execution or shell script execution
    pub mode: ExecMode,
    /// Upper bound on a single command's run time
    pub timeout: Option<Duration>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("jj"),
            mode: ExecMode::Direct,
            timeout: None,
        }
    }
}

/// Captured outcome of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Display form of the attempted command
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    /// Why the command failed, if it did
    pub failure: Option<String>,
}

impl ExecutionResult {
    /// A command that exited successfully.
    pub fn success(
        command: impl Into<String>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            stdout: stdout.into(),
            stderr: stderr.into(),
            failure: None,
        }
    }

    /// A command that could not run or exited unsuccessfully.
    pub fn failed(command: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            stdout: String::new(),
            stderr: String::new(),
            failure: Some(failure.into()),
        }
    }

    /// Attach captured streams to a result.
    pub fn with_output(mut self, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self.stderr = stderr.into();
        self
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Fold the result into the text returned to the caller.
    ///
    /// - success without stderr: stdout verbatim
    /// - success with stderr (jj writes hints and warnings there):
    ///   `stdout: ...\nstderr: ...`
    /// - failure: `Error executing command: <command>: <reason>` followed by
    ///   whichever streams captured output
    pub fn to_text(&self) -> String {
        match &self.failure {
            None if self.stderr.is_empty() => self.stdout.clone(),
            None => format!("stdout: {}\nstderr: {}", self.stdout, self.stderr),
            Some(reason) => {
                let mut text = format!("Error executing command: {}: {}", self.command, reason);
                if !self.stderr.is_empty() {
                    text.push_str("\nstderr: ");
                    text.push_str(&self.stderr);
                }
                if !self.stdout.is_empty() {
                    text.push_str("\nstdout: ");
                    text.push_str(&self.stdout);
                }
                text
            }
        }
    }
}

/// Runs command lines against a working directory
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` with `working_dir` as the current directory.
    async fn execute(&self, command: &CommandLine, working_dir: &Path) -> ExecutionResult;
}

/// Production runner spawning the `jj` binary
///
/// Each call is a single attempt; there are no retries. Children are
/// spawned with `kill_on_drop`, so dropping an in-flight `execute` future
/// (or hitting the configured timeout) terminates the subprocess.
#[derive(Debug, Clone, Default)]
pub struct JjExecutor {
    config: ExecutorConfig,
}

impl JjExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    fn program(&self) -> String {
        self.config.binary.to_string_lossy().into_owned()
    }

    /// Build the OS process for `command` according to the execution mode.
    fn process(&self, command: &CommandLine) -> Result<Command, String> {
        match self.config.mode {
            ExecMode::Direct => {
                let mut process = Command::new(&self.config.binary);
                process.args(command.argv());
                Ok(process)
            }
            ExecMode::Shell => shell_command(&command.to_shell_script(&self.program())),
        }
    }

    fn fail(&self, shown: &str, working_dir: &Path, reason: String) -> ExecutionResult {
        warn!(
            command = %shown,
            working_dir = %working_dir.display(),
            error = %reason,
            "Failed to execute Jujutsu command"
        );
        ExecutionResult::failed(shown, reason)
    }
}

#[cfg(unix)]
fn shell_command(script: &str) -> Result<Command, String> {
    let mut process = Command::new("sh");
    process.arg("-c").arg(script);
    Ok(process)
}

#[cfg(not(unix))]
fn shell_command(_script: &str) -> Result<Command, String> {
    Err("shell execution mode requires a POSIX shell".to_string())
}

fn describe_exit(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[async_trait]
impl CommandRunner for JjExecutor {
    async fn execute(&self, command: &CommandLine, working_dir: &Path) -> ExecutionResult {
        let shown = command.display_with(&self.program());

        if !working_dir.is_dir() {
            return self.fail(
                &shown,
                working_dir,
                format!(
                    "working directory does not exist or is not a directory: {}",
                    working_dir.display()
                ),
            );
        }

        let mut process = match self.process(command) {
            Ok(process) => process,
            Err(reason) => return self.fail(&shown, working_dir, reason),
        };
        process
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(
            command = %shown,
            working_dir = %working_dir.display(),
            mode = %self.config.mode,
            "Executing Jujutsu command"
        );

        let output = match self.config.timeout {
            Some(limit) => match tokio::time::timeout(limit, process.output()).await {
                Ok(output) => output,
                Err(_) => {
                    return self.fail(&shown, working_dir, format!("timed out after {:?}", limit));
                }
            },
            None => process.output().await,
        };

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                return self.fail(
                    &shown,
                    working_dir,
                    format!("failed to spawn {}: {}", self.program(), e),
                );
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            ExecutionResult::success(shown, stdout, stderr)
        } else {
            self.fail(&shown, working_dir, describe_exit(output.status))
                .with_output(stdout, stderr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exec_mode_parse() {
        assert_eq!("direct".parse::<ExecMode>().unwrap(), ExecMode::Direct);
        assert_eq!("Shell".parse::<ExecMode>().unwrap(), ExecMode::Shell);
        assert!(matches!(
            "bash".parse::<ExecMode>(),
            Err(Error::UnknownExecMode(mode)) if mode == "bash"
        ));
    }

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.binary, PathBuf::from("jj"));
        assert_eq!(config.mode, ExecMode::Direct);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_text_of_clean_success_is_stdout() {
        let result = ExecutionResult::success("jj status", "The working copy has no changes.\n", "");
        assert_eq!(result.to_text(), "The working copy has no changes.\n");
        assert!(!result.is_failure());
    }

    #[test]
    fn test_text_of_success_with_warnings_labels_streams() {
        let result = ExecutionResult::success("jj git fetch", "", "Nothing changed.\n");
        assert_eq!(result.to_text(), "stdout: \nstderr: Nothing changed.\n");
    }

    #[test]
    fn test_text_of_failure_names_command() {
        let result = ExecutionResult::failed("jj abandon -r xyz", "exited with status 1")
            .with_output("", "Error: Revision `xyz` doesn't exist\n");
        let text = result.to_text();
        assert!(result.is_failure());
        assert_eq!(
            text,
            "Error executing command: jj abandon -r xyz: exited with status 1\nstderr: Error: Revision `xyz` doesn't exist\n"
        );
    }

    #[tokio::test]
    async fn test_missing_working_directory_is_reported() {
        let executor = JjExecutor::default();
        let result = executor
            .execute(&CommandLine::new(["status"]), Path::new("/definitely/not/here"))
            .await;
        assert!(result.is_failure());
        assert!(result.to_text().contains("jj status"));
        assert!(result.to_text().contains("/definitely/not/here"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_reported() {
        let temp = tempfile::TempDir::new().unwrap();
        let executor = JjExecutor::new(ExecutorConfig {
            binary: PathBuf::from("jj-binary-that-does-not-exist"),
            ..ExecutorConfig::default()
        });
        let result = executor.execute(&CommandLine::new(["status"]), temp.path()).await;
        assert!(result.is_failure());
        let text = result.to_text();
        assert!(text.starts_with("Error executing command: jj-binary-that-does-not-exist status"));
        assert!(text.contains("failed to spawn"));
    }
}
