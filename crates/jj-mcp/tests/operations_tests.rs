//! Tool dispatch tests against a recording runner
//!
//! Each test drives a tool through the registry and checks the exact command
//! handed to the runner, or that nothing was run at all.

use jj_command::{Arg, ExecutionResult};
use jj_mcp::handlers::handle_tool_call;
use jj_mcp::{Registry, ToolResult};
use jj_test_utils::RecordingRunner;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

async fn call(runner: &RecordingRunner, tool: &str, arguments: Value) -> ToolResult {
    let registry = Registry::builtin().unwrap();
    match handle_tool_call(&registry, runner, tool, arguments).await {
        Ok(result) => result,
        Err(e) => ToolResult::error(e.to_string()),
    }
}

// ============================================================================
// Command Shapes
// ============================================================================

#[rstest]
#[case("jj_status", json!({}), vec!["status"])]
#[case("jj_log", json!({"limit": 5}), vec!["log", "--limit", "5", "-T", "builtin_log_compact_full_description"])]
#[case("jj_diff", json!({}), vec!["diff", "-r", "@", "--git"])]
#[case("jj_diff", json!({"revision": "abc", "git": false}), vec!["diff", "-r", "abc"])]
#[case("jj_show", json!({}), vec!["show", "--git", "@"])]
#[case("jj_describe", json!({}), vec!["describe", "-m", ""])]
#[case("jj_commit", json!({"message": ""}), vec!["commit", "-m", ""])]
#[case("jj_abandon", json!({"revision": "xyz"}), vec!["abandon", "-r", "xyz"])]
#[case("jj_bookmark", json!({"action": "list"}), vec!["bookmark", "list"])]
#[case("jj_git_fetch", json!({}), vec!["git", "fetch"])]
#[case("jj_git_remote_list", json!({}), vec!["git", "remote", "list"])]
#[case("jj_undo", json!({}), vec!["undo"])]
#[case("jj_squash", json!({"message": ""}), vec!["squash"])]
#[case("jj_squash", json!({"message": "", "useDestinationMessage": true}), vec!["squash", "-u"])]
#[tokio::test]
async fn test_command_shape(
    #[case] tool: &str,
    #[case] arguments: Value,
    #[case] expected: Vec<&str>,
) {
    let mut arguments = arguments;
    arguments["workingDirectory"] = json!("/home/user/project");
    let runner = RecordingRunner::new();

    let result = call(&runner, tool, arguments).await;

    assert!(!result.is_error(), "{}", result.text_content());
    assert_eq!(runner.single_argv(), expected);
    assert_eq!(
        runner.calls()[0].working_dir,
        std::path::Path::new("/home/user/project")
    );
}

#[tokio::test]
async fn test_commit_message_is_passed_verbatim() {
    let runner = RecordingRunner::new();
    let message = "fix: handle \"quoted\" and 'single' $HOME `ticks`\n\nSecond paragraph\n";

    call(
        &runner,
        "jj_commit",
        json!({"workingDirectory": "/repo", "message": message}),
    )
    .await;

    let calls = runner.calls();
    assert_eq!(calls[0].command.as_args()[2], Arg::Text(message.to_string()));
}

// ============================================================================
// Validation Runs Nothing
// ============================================================================

#[rstest]
#[case("jj_rebase", json!({"workingDirectory": "/repo"}))]
#[case("jj_bookmark", json!({"workingDirectory": "/repo", "action": "create"}))]
#[case("jj_bookmark", json!({"workingDirectory": "/repo", "action": "delete"}))]
#[case("jj_bookmark_set", json!({"workingDirectory": "/repo", "names": []}))]
#[case("jj_commit", json!({"workingDirectory": "/repo"}))]
#[case("jj_status", json!({}))]
#[case("jj_status", json!({"workingDirectory": "./relative"}))]
#[case("jj_edit", json!({"workingDirectory": "/repo", "revision": "--ignore-immutable"}))]
#[case("jj_git_push", json!({"workingDirectory": "/repo", "named": ["no-equals"]}))]
#[tokio::test]
async fn test_rejected_arguments_run_nothing(#[case] tool: &str, #[case] arguments: Value) {
    let runner = RecordingRunner::new();

    let result = call(&runner, tool, arguments).await;

    assert!(result.is_error());
    assert!(!result.text_content().is_empty());
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn test_bookmark_name_message() {
    let runner = RecordingRunner::new();

    let result = call(
        &runner,
        "jj_bookmark",
        json!({"workingDirectory": "/repo", "action": "create"}),
    )
    .await;

    assert_eq!(
        result.text_content(),
        "Bookmark name is required for create action"
    );
}

// ============================================================================
// Results
// ============================================================================

#[rstest]
#[case("jj_status")]
#[case("jj_log")]
#[tokio::test]
async fn test_read_only_tools_are_idempotent(#[case] tool: &str) {
    let runner = RecordingRunner::with_stdout("@ qpvuntsm\n");
    let arguments = json!({"workingDirectory": "/repo"});

    let first = call(&runner, tool, arguments.clone()).await;
    let second = call(&runner, tool, arguments).await;

    assert_eq!(first.text_content(), second.text_content());
    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test]
async fn test_soft_warning_is_not_an_error() {
    let runner = RecordingRunner::with_responder(|command| {
        ExecutionResult::success(
            command.to_string(),
            "Created bookmark feat\n",
            "Warning: target revision is empty\n",
        )
    });

    let result = call(
        &runner,
        "jj_bookmark",
        json!({"workingDirectory": "/repo", "action": "create", "name": "feat"}),
    )
    .await;

    assert!(!result.is_error());
    assert_eq!(
        result.text_content(),
        "stdout: Created bookmark feat\n\nstderr: Warning: target revision is empty\n"
    );
}

#[tokio::test]
async fn test_failure_text_names_the_command() {
    let runner = RecordingRunner::failing(
        "exited with status 1",
        "Error: Revision `nope` doesn't exist\n",
    );

    let result = call(
        &runner,
        "jj_abandon",
        json!({"workingDirectory": "/repo", "revision": "nope"}),
    )
    .await;

    assert!(result.is_error());
    assert_eq!(
        result.text_content(),
        "Error executing command: jj abandon -r nope: exited with status 1\nstderr: Error: Revision `nope` doesn't exist\n"
    );
}
