//! Git interop: repository init, remotes, push and fetch

use std::path::PathBuf;

use jj_command::CommandLine;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{Action, Invocation, ensure_not_flag};
use crate::registry::ToolSpec;
use crate::{Error, Result};

/// Tools in this group, in registration order.
pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::of::<GitPushArgs>(),
        ToolSpec::of::<GitFetchArgs>(),
        ToolSpec::of::<GitRemoteAddArgs>(),
        ToolSpec::of::<GitRemoteListArgs>(),
        ToolSpec::of::<GitRemoteRemoveArgs>(),
        ToolSpec::of::<GitRemoteRenameArgs>(),
        ToolSpec::of::<GitRemoteSetUrlArgs>(),
        ToolSpec::of::<GitInitArgs>(),
    ]
}

/// Arguments for jj_git_init
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GitInitArgs {
    /// Absolute path of the directory to initialize
    pub working_directory: PathBuf,
    /// Share the working copy with a git repository in the same directory
    #[serde(default)]
    pub colocate: bool,
}

impl Action for GitInitArgs {
    const NAME: &'static str = "jj_git_init";
    const DESCRIPTION: &'static str = "Create a new repository backed by git";

    fn invocation(self) -> Result<Invocation> {
        let command = CommandLine::new(["git", "init"]).switch("--colocate", self.colocate);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_git_push
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GitPushArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Remote to push to
    #[serde(default)]
    pub remote: Option<String>,
    /// Push bookmarks pointing to these revisions
    #[serde(default)]
    pub revisions: Vec<String>,
    /// Push only these bookmarks (names or patterns)
    #[serde(default)]
    pub bookmarks: Vec<String>,
    /// Push these changes, creating bookmarks for them as needed
    #[serde(default)]
    pub changes: Vec<String>,
    /// Create and push bookmarks given as NAME=REVISION
    #[serde(default)]
    pub named: Vec<String>,
    /// Push all bookmarks
    #[serde(default)]
    pub all: bool,
    /// Push all tracked bookmarks
    #[serde(default)]
    pub tracked: bool,
    /// Push all deleted bookmarks
    #[serde(default)]
    pub deleted: bool,
    /// Allow pushing commits with empty descriptions
    #[serde(default)]
    pub allow_empty_description: bool,
    /// Allow pushing new bookmarks
    #[serde(default)]
    pub allow_new: bool,
    /// Allow pushing commits that are private
    #[serde(default)]
    pub allow_private: bool,
    /// Only display what would be pushed
    #[serde(default)]
    pub dry_run: bool,
}

impl Action for GitPushArgs {
    const NAME: &'static str = "jj_git_push";
    const DESCRIPTION: &'static str = "Push bookmarks to a git remote";

    fn invocation(self) -> Result<Invocation> {
        if let Some(malformed) = self.named.iter().find(|named| !is_named_target(named)) {
            return Err(Error::Validation(format!(
                "named entries must have the form NAME=REVISION, got '{}'",
                malformed
            )));
        }

        let command = CommandLine::new(["git", "push"])
            .option("--remote", self.remote)
            .repeated("-r", self.revisions)
            .repeated("-b", self.bookmarks)
            .repeated("-c", self.changes)
            .repeated("--named", self.named)
            .switch("--all", self.all)
            .switch("--tracked", self.tracked)
            .switch("--deleted", self.deleted)
            .switch("--allow-empty-description", self.allow_empty_description)
            .switch("-N", self.allow_new)
            .switch("--allow-private", self.allow_private)
            .switch("--dry-run", self.dry_run);
        Invocation::new(self.working_directory, command)
    }
}

fn is_named_target(value: &str) -> bool {
    matches!(value.split_once('='), Some((name, revision)) if !name.is_empty() && !revision.is_empty())
}

/// Arguments for jj_git_fetch
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GitFetchArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Remotes to fetch from
    #[serde(default)]
    pub remotes: Vec<String>,
    /// Fetch only these branches (names or patterns)
    #[serde(default)]
    pub branches: Vec<String>,
    /// Fetch from all remotes
    #[serde(default)]
    pub all_remotes: bool,
}

impl Action for GitFetchArgs {
    const NAME: &'static str = "jj_git_fetch";
    const DESCRIPTION: &'static str = "Fetch from git remotes";

    fn invocation(self) -> Result<Invocation> {
        let command = CommandLine::new(["git", "fetch"])
            .repeated("--remote", self.remotes)
            .repeated("-b", self.branches)
            .switch("--all-remotes", self.all_remotes);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_git_remote_add
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GitRemoteAddArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Remote name
    pub name: String,
    /// Remote URL
    pub url: String,
}

impl Action for GitRemoteAddArgs {
    const NAME: &'static str = "jj_git_remote_add";
    const DESCRIPTION: &'static str = "Add a git remote";

    fn invocation(self) -> Result<Invocation> {
        ensure_not_flag("name", &self.name)?;
        ensure_not_flag("url", &self.url)?;
        let command = CommandLine::new(["git", "remote", "add"])
            .arg(self.name)
            .arg(self.url);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_git_remote_list
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GitRemoteListArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
}

impl Action for GitRemoteListArgs {
    const NAME: &'static str = "jj_git_remote_list";
    const DESCRIPTION: &'static str = "List git remotes";

    fn invocation(self) -> Result<Invocation> {
        Invocation::new(
            self.working_directory,
            CommandLine::new(["git", "remote", "list"]),
        )
    }
}

/// Arguments for jj_git_remote_remove
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GitRemoteRemoveArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Remote to remove
    pub name: String,
}

impl Action for GitRemoteRemoveArgs {
    const NAME: &'static str = "jj_git_remote_remove";
    const DESCRIPTION: &'static str = "Remove a git remote and its remote-tracking bookmarks";

    fn invocation(self) -> Result<Invocation> {
        ensure_not_flag("name", &self.name)?;
        let command = CommandLine::new(["git", "remote", "remove"]).arg(self.name);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_git_remote_rename
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GitRemoteRenameArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Current remote name
    pub old: String,
    /// New remote name
    pub new: String,
}

impl Action for GitRemoteRenameArgs {
    const NAME: &'static str = "jj_git_remote_rename";
    const DESCRIPTION: &'static str = "Rename a git remote";

    fn invocation(self) -> Result<Invocation> {
        ensure_not_flag("old", &self.old)?;
        ensure_not_flag("new", &self.new)?;
        let command = CommandLine::new(["git", "remote", "rename"])
            .arg(self.old)
            .arg(self.new);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_git_remote_set_url
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GitRemoteSetUrlArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Remote name
    pub name: String,
    /// New remote URL
    pub url: String,
}

impl Action for GitRemoteSetUrlArgs {
    const NAME: &'static str = "jj_git_remote_set_url";
    const DESCRIPTION: &'static str = "Change the URL of a git remote";

    fn invocation(self) -> Result<Invocation> {
        ensure_not_flag("name", &self.name)?;
        ensure_not_flag("url", &self.url)?;
        let command = CommandLine::new(["git", "remote", "set-url"])
            .arg(self.name)
            .arg(self.url);
        Invocation::new(self.working_directory, command)
    }
}
