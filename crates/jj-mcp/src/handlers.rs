//! MCP Tool Handlers
//!
//! A tool call is resolved against the registry, its arguments are decoded
//! and validated into a command, and the command runs through the
//! [`CommandRunner`]. Nothing is spawned when validation fails.

use jj_command::CommandRunner;
use serde_json::Value;
use tracing::{info, warn};

use crate::registry::Registry;
use crate::tools::ToolResult;
use crate::{Error, Result};

/// Handle a tool call by dispatching to the registered operation
///
/// # Errors
///
/// Returns `Error::UnknownTool` for unregistered names, and
/// `Error::InvalidArguments` or `Error::Validation` when the arguments are
/// rejected. A command that runs and fails is not an error here: it comes
/// back as a [`ToolResult`] flagged `isError`.
pub async fn handle_tool_call(
    registry: &Registry,
    runner: &dyn CommandRunner,
    tool_name: &str,
    arguments: Value,
) -> Result<ToolResult> {
    let tool = registry
        .tool(tool_name)
        .ok_or_else(|| Error::UnknownTool(tool_name.to_string()))?;

    let invocation = tool.invocation(arguments).inspect_err(|e| {
        warn!(tool = tool_name, error = %e, "Rejected tool arguments");
    })?;

    info!(
        tool = tool_name,
        command = %invocation.command,
        working_dir = %invocation.working_directory.display(),
        "Running tool"
    );

    let result = runner
        .execute(&invocation.command, &invocation.working_directory)
        .await;
    Ok(ToolResult::from_execution(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jj_test_utils::RecordingRunner;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::Path;

    #[tokio::test]
    async fn test_runs_built_command_in_working_directory() {
        let registry = Registry::builtin().unwrap();
        let runner = RecordingRunner::with_stdout("Working copy changes:\n");

        let result = handle_tool_call(
            &registry,
            &runner,
            "jj_status",
            json!({"workingDirectory": "/home/user/repo"}),
        )
        .await
        .unwrap();

        assert!(!result.is_error());
        assert_eq!(result.text_content(), "Working copy changes:\n");

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].argv(), vec!["status"]);
        assert_eq!(calls[0].working_dir, Path::new("/home/user/repo"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = Registry::builtin().unwrap();
        let runner = RecordingRunner::new();

        let result = handle_tool_call(&registry, &runner, "jj_frobnicate", json!({})).await;

        assert!(matches!(result, Err(Error::UnknownTool(name)) if name == "jj_frobnicate"));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_validation_failure_runs_nothing() {
        let registry = Registry::builtin().unwrap();
        let runner = RecordingRunner::new();

        let result = handle_tool_call(
            &registry,
            &runner,
            "jj_bookmark",
            json!({"workingDirectory": "/repo", "action": "create"}),
        )
        .await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_command_failure_is_error_result() {
        let registry = Registry::builtin().unwrap();
        let runner = RecordingRunner::failing("exited with status 1", "Error: No such revision");

        let result = handle_tool_call(
            &registry,
            &runner,
            "jj_abandon",
            json!({"workingDirectory": "/repo", "revision": "zzz"}),
        )
        .await
        .unwrap();

        assert!(result.is_error());
        assert!(result.text_content().contains("jj abandon -r zzz"));
        assert!(result.text_content().contains("Error: No such revision"));
    }
}
