//! MCP Resource Handlers
//!
//! Views run against the server's root directory. A view whose command
//! fails still answers; the failure text becomes the content.

use std::path::Path;

use jj_command::{CommandLine, CommandRunner};
use tracing::{debug, warn};

use crate::registry::Registry;
use crate::resources::{INFO_LOG_LIMIT, INFO_LOG_TEMPLATE, ResourceContent, View};
use crate::{Error, Result};

/// Read a resource by URI
///
/// # Errors
///
/// Returns `Error::UnknownResource` if no registered view has this URI.
pub async fn read_resource(
    registry: &Registry,
    runner: &dyn CommandRunner,
    root: &Path,
    uri: &str,
) -> Result<ResourceContent> {
    let view = registry
        .resource(uri)
        .ok_or_else(|| Error::UnknownResource(uri.to_string()))?;

    debug!(uri, root = %root.display(), "Reading resource");

    let text = match view {
        View::Version => read_version(runner, root).await,
        View::Info => read_info(runner, root).await,
    };
    Ok(ResourceContent::text(view, text))
}

async fn run(runner: &dyn CommandRunner, root: &Path, command: CommandLine) -> String {
    let result = runner.execute(&command, root).await;
    if result.is_failure() {
        warn!(command = %result.command, "View command failed");
    }
    result.to_text()
}

async fn read_version(runner: &dyn CommandRunner, root: &Path) -> String {
    run(runner, root, CommandLine::new(["--version"])).await
}

/// Status then the compact log, issued in that order.
async fn read_info(runner: &dyn CommandRunner, root: &Path) -> String {
    let status = run(runner, root, CommandLine::new(["status"])).await;
    let log = run(
        runner,
        root,
        CommandLine::new(["log", "-T", INFO_LOG_TEMPLATE])
            .arg("--limit")
            .arg(INFO_LOG_LIMIT.to_string()),
    )
    .await;

    format!("## Status\n{}\n\n## Log\n{}", status, log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jj_command::ExecutionResult;
    use jj_test_utils::RecordingRunner;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_version_view() {
        let registry = Registry::builtin().unwrap();
        let runner = RecordingRunner::with_stdout("jj 0.30.0\n");

        let content = read_resource(&registry, &runner, Path::new("."), "jujutsu://version")
            .await
            .unwrap();

        assert_eq!(content.uri, "jujutsu://version");
        assert_eq!(content.text, "jj 0.30.0\n");
        assert_eq!(runner.single_argv(), vec!["--version"]);
    }

    #[tokio::test]
    async fn test_info_view_runs_status_then_log() {
        let registry = Registry::builtin().unwrap();
        let runner = RecordingRunner::with_responder(|command| {
            let stdout = match command.argv().next() {
                Some("status") => "clean",
                Some("log") => "@ abc",
                _ => "",
            };
            ExecutionResult::success(command.to_string(), stdout, "")
        });

        let content = read_resource(&registry, &runner, Path::new("/repo"), "jujutsu://info")
            .await
            .unwrap();

        assert_eq!(content.text, "## Status\nclean\n\n## Log\n@ abc");

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].argv(), vec!["status"]);
        assert_eq!(
            calls[1].argv(),
            vec!["log", "-T", "builtin_log_compact", "--limit", "10"]
        );
        assert!(calls.iter().all(|call| call.working_dir == Path::new("/repo")));
    }

    #[tokio::test]
    async fn test_failed_view_command_becomes_content() {
        let registry = Registry::builtin().unwrap();
        let runner = RecordingRunner::failing("exited with status 1", "no repo");

        let content = read_resource(&registry, &runner, Path::new("."), "jujutsu://version")
            .await
            .unwrap();

        assert!(content.text.starts_with("Error executing command: jj --version"));
        assert!(content.text.contains("no repo"));
    }

    #[tokio::test]
    async fn test_unknown_resource() {
        let registry = Registry::builtin().unwrap();
        let runner = RecordingRunner::new();

        let result = read_resource(&registry, &runner, Path::new("."), "jujutsu://nope").await;

        assert!(matches!(result, Err(Error::UnknownResource(uri)) if uri == "jujutsu://nope"));
        assert_eq!(runner.call_count(), 0);
    }
}
