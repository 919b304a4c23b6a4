//! Inspection and everyday change editing

use std::path::PathBuf;

use jj_command::CommandLine;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{Action, Invocation, default_revision, default_true, ensure_none_flags, ensure_not_flag};
use crate::Result;
use crate::registry::ToolSpec;

/// Template used by `jj_log` when the caller does not pick one.
pub const DEFAULT_LOG_TEMPLATE: &str = "builtin_log_compact_full_description";

/// Tools in this group, in registration order.
pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::of::<StatusArgs>(),
        ToolSpec::of::<LogArgs>(),
        ToolSpec::of::<DiffArgs>(),
        ToolSpec::of::<ShowArgs>(),
        ToolSpec::of::<CommitArgs>(),
        ToolSpec::of::<DescribeArgs>(),
        ToolSpec::of::<NewArgs>(),
        ToolSpec::of::<EditArgs>(),
        ToolSpec::of::<UndoArgs>(),
        ToolSpec::of::<OpLogArgs>(),
    ]
}

/// Arguments for jj_status
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatusArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
}

impl Action for StatusArgs {
    const NAME: &'static str = "jj_status";
    const DESCRIPTION: &'static str = "Show the working copy status";

    fn invocation(self) -> Result<Invocation> {
        Invocation::new(self.working_directory, CommandLine::new(["status"]))
    }
}

/// Arguments for jj_log
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LogArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Maximum number of revisions to show
    #[serde(default)]
    pub limit: Option<u32>,
    /// Revsets to show (e.g. "main", "@-", "bookmarks()")
    #[serde(default)]
    pub revisions: Vec<String>,
    /// Output template (defaults to builtin_log_compact_full_description)
    #[serde(default)]
    pub template: Option<String>,
}

impl Action for LogArgs {
    const NAME: &'static str = "jj_log";
    const DESCRIPTION: &'static str = "Show revision history";

    fn invocation(self) -> Result<Invocation> {
        let template = self
            .template
            .unwrap_or_else(|| DEFAULT_LOG_TEMPLATE.to_string());
        let command = CommandLine::new(["log"])
            .option("--limit", self.limit.map(|n| n.to_string()))
            .repeated("-r", self.revisions)
            .arg("-T")
            .arg(template);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_diff
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiffArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Revision to diff
    #[serde(default = "default_revision")]
    pub revision: String,
    /// Use git diff format
    #[serde(default = "default_true")]
    pub git: bool,
}

impl Action for DiffArgs {
    const NAME: &'static str = "jj_diff";
    const DESCRIPTION: &'static str = "Show the changes in a revision";

    fn invocation(self) -> Result<Invocation> {
        let command = CommandLine::new(["diff"])
            .arg("-r")
            .arg(self.revision)
            .switch("--git", self.git);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_show
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ShowArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Revision to show
    #[serde(default = "default_revision")]
    pub revision: String,
    /// Use git diff format
    #[serde(default = "default_true")]
    pub git: bool,
}

impl Action for ShowArgs {
    const NAME: &'static str = "jj_show";
    const DESCRIPTION: &'static str = "Show a revision's description and changes";

    fn invocation(self) -> Result<Invocation> {
        ensure_not_flag("revision", &self.revision)?;
        let command = CommandLine::new(["show"])
            .switch("--git", self.git)
            .arg(self.revision);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_commit
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommitArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Commit message (may be empty)
    pub message: String,
}

impl Action for CommitArgs {
    const NAME: &'static str = "jj_commit";
    const DESCRIPTION: &'static str =
        "Describe the working-copy change and start a new empty change on top of it";

    fn invocation(self) -> Result<Invocation> {
        let command = CommandLine::new(["commit"]).text("-m", self.message);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_describe
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DescribeArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// New description
    #[serde(default)]
    pub message: String,
    /// Revision to describe (defaults to the working-copy change)
    #[serde(default)]
    pub revision: Option<String>,
}

impl Action for DescribeArgs {
    const NAME: &'static str = "jj_describe";
    const DESCRIPTION: &'static str = "Update the description of a change";

    fn invocation(self) -> Result<Invocation> {
        if let Some(revision) = &self.revision {
            ensure_not_flag("revision", revision)?;
        }
        let mut command = CommandLine::new(["describe"]).text("-m", self.message);
        if let Some(revision) = self.revision {
            command = command.arg(revision);
        }
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_new
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Description for the new change
    #[serde(default)]
    pub message: Option<String>,
    /// Parent revisions (defaults to the working-copy change)
    #[serde(default)]
    pub revisions: Vec<String>,
}

impl Action for NewArgs {
    const NAME: &'static str = "jj_new";
    const DESCRIPTION: &'static str = "Create a new empty change and make it the working copy";

    fn invocation(self) -> Result<Invocation> {
        ensure_none_flags("revisions", &self.revisions)?;
        let mut command = CommandLine::new(["new"]);
        if let Some(message) = self.message {
            command = command.text("-m", message);
        }
        Invocation::new(self.working_directory, command.args(self.revisions))
    }
}

/// Arguments for jj_edit
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EditArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Revision to make the working copy
    pub revision: String,
}

impl Action for EditArgs {
    const NAME: &'static str = "jj_edit";
    const DESCRIPTION: &'static str = "Make an existing revision the working-copy change";

    fn invocation(self) -> Result<Invocation> {
        ensure_not_flag("revision", &self.revision)?;
        let command = CommandLine::new(["edit"]).arg(self.revision);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_undo
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UndoArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
}

impl Action for UndoArgs {
    const NAME: &'static str = "jj_undo";
    const DESCRIPTION: &'static str = "Undo the last operation";

    fn invocation(self) -> Result<Invocation> {
        Invocation::new(self.working_directory, CommandLine::new(["undo"]))
    }
}

/// Arguments for jj_op_log
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OpLogArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Maximum number of operations to show
    #[serde(default)]
    pub limit: Option<u32>,
}

impl Action for OpLogArgs {
    const NAME: &'static str = "jj_op_log";
    const DESCRIPTION: &'static str = "Show the operation log";

    fn invocation(self) -> Result<Invocation> {
        let command = CommandLine::new(["op", "log"])
            .option("--limit", self.limit.map(|n| n.to_string()));
        Invocation::new(self.working_directory, command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::parse_arguments;
    use jj_command::Arg;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn build<A: Action>(arguments: Value) -> Result<Invocation> {
        parse_arguments::<A>(arguments)?.invocation()
    }

    fn argv<A: Action>(arguments: Value) -> Vec<String> {
        build::<A>(arguments)
            .unwrap()
            .command
            .argv()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_status_has_no_flags() {
        let invocation = build::<StatusArgs>(json!({"workingDirectory": "/repo"})).unwrap();
        assert_eq!(invocation.working_directory, PathBuf::from("/repo"));
        assert_eq!(invocation.command, CommandLine::new(["status"]));
    }

    #[test]
    fn test_status_requires_working_directory() {
        assert!(build::<StatusArgs>(json!({})).is_err());
    }

    #[test]
    fn test_log_defaults_to_full_description_template() {
        assert_eq!(
            argv::<LogArgs>(json!({"workingDirectory": "/repo"})),
            vec!["log", "-T", "builtin_log_compact_full_description"]
        );
    }

    #[test]
    fn test_log_with_all_fields() {
        assert_eq!(
            argv::<LogArgs>(json!({
                "workingDirectory": "/repo",
                "limit": 5,
                "revisions": ["main", "@-"],
                "template": "builtin_log_oneline"
            })),
            vec!["log", "--limit", "5", "-r", "main", "-r", "@-", "-T", "builtin_log_oneline"]
        );
    }

    #[test]
    fn test_log_rejects_negative_limit() {
        assert!(build::<LogArgs>(json!({"workingDirectory": "/repo", "limit": -1})).is_err());
    }

    #[test]
    fn test_diff_defaults_to_working_copy_in_git_format() {
        assert_eq!(
            argv::<DiffArgs>(json!({"workingDirectory": "/repo"})),
            vec!["diff", "-r", "@", "--git"]
        );
    }

    #[test]
    fn test_diff_git_false_omits_flag() {
        assert_eq!(
            argv::<DiffArgs>(json!({"workingDirectory": "/repo", "revision": "main", "git": false})),
            vec!["diff", "-r", "main"]
        );
    }

    #[test]
    fn test_show_defaults() {
        assert_eq!(
            argv::<ShowArgs>(json!({"workingDirectory": "/repo"})),
            vec!["show", "--git", "@"]
        );
    }

    #[test]
    fn test_commit_message_is_text_argument() {
        let message = "Fix: Update 'config' file\nAdded \"new feature\" support";
        let invocation =
            build::<CommitArgs>(json!({"workingDirectory": "/path/to/repo", "message": message}))
                .unwrap();
        assert_eq!(
            invocation.command.as_args(),
            &[
                Arg::Plain("commit".into()),
                Arg::Plain("-m".into()),
                Arg::Text(message.into()),
            ]
        );
    }

    #[test]
    fn test_commit_accepts_empty_message() {
        assert_eq!(
            argv::<CommitArgs>(json!({"workingDirectory": "/repo", "message": ""})),
            vec!["commit", "-m", ""]
        );
    }

    #[test]
    fn test_commit_requires_message() {
        assert!(build::<CommitArgs>(json!({"workingDirectory": "/repo"})).is_err());
    }

    #[test]
    fn test_describe_defaults_to_empty_message() {
        assert_eq!(
            argv::<DescribeArgs>(json!({"workingDirectory": "/repo"})),
            vec!["describe", "-m", ""]
        );
    }

    #[test]
    fn test_describe_with_revision() {
        assert_eq!(
            argv::<DescribeArgs>(json!({
                "workingDirectory": "/repo",
                "message": "docs: typo",
                "revision": "@-"
            })),
            vec!["describe", "-m", "docs: typo", "@-"]
        );
    }

    #[test]
    fn test_new_with_message_and_parents() {
        assert_eq!(
            argv::<NewArgs>(json!({
                "workingDirectory": "/repo",
                "message": "wip",
                "revisions": ["main", "feature"]
            })),
            vec!["new", "-m", "wip", "main", "feature"]
        );
    }

    #[test]
    fn test_edit_rejects_flag_like_revision() {
        assert!(build::<EditArgs>(json!({"workingDirectory": "/repo", "revision": "--help"})).is_err());
    }

    #[test]
    fn test_op_log_limit() {
        assert_eq!(
            argv::<OpLogArgs>(json!({"workingDirectory": "/repo", "limit": 3})),
            vec!["op", "log", "--limit", "3"]
        );
    }

    #[test]
    fn test_undo() {
        assert_eq!(argv::<UndoArgs>(json!({"workingDirectory": "/repo"})), vec!["undo"]);
    }
}
