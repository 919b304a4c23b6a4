//! History rewriting

use std::path::PathBuf;

use jj_command::CommandLine;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{Action, Invocation, ensure_none_flags};
use crate::registry::ToolSpec;
use crate::{Error, Result};

/// Tools in this group, in registration order.
pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::of::<AbandonArgs>(),
        ToolSpec::of::<SquashArgs>(),
        ToolSpec::of::<RebaseArgs>(),
    ]
}

/// Arguments for jj_abandon
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AbandonArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Revision to abandon
    pub revision: String,
}

impl Action for AbandonArgs {
    const NAME: &'static str = "jj_abandon";
    const DESCRIPTION: &'static str = "Abandon a revision, rebasing its descendants onto its parents";

    fn invocation(self) -> Result<Invocation> {
        let command = CommandLine::new(["abandon"]).arg("-r").arg(self.revision);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_squash
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SquashArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Description for the combined revision; empty lets jj combine the
    /// existing descriptions
    pub message: String,
    /// Revision to squash into its parent
    #[serde(default)]
    pub revision: Option<String>,
    /// Revision to squash into
    #[serde(default)]
    pub into: Option<String>,
    /// Revisions to squash from
    #[serde(default)]
    pub from: Vec<String>,
    /// Only move changes to these paths
    #[serde(default)]
    pub paths: Vec<String>,
    /// Diff editor used to select changes
    #[serde(default)]
    pub tool: Option<String>,
    /// Keep the source revision even if it becomes empty
    #[serde(default)]
    pub keep_emptied: bool,
    /// Use the destination's description and discard the source's
    #[serde(default)]
    pub use_destination_message: bool,
}

impl Action for SquashArgs {
    const NAME: &'static str = "jj_squash";
    const DESCRIPTION: &'static str = "Move changes from one revision into another";

    fn invocation(self) -> Result<Invocation> {
        ensure_none_flags("paths", &self.paths)?;

        let mut command = CommandLine::new(["squash"])
            .option("-r", self.revision)
            .option("-t", self.into)
            .repeated("-f", self.from)
            .args(self.paths)
            .option("--tool", self.tool);
        if !self.message.is_empty() {
            command = command.text("-m", self.message);
        }
        let command = command
            .switch("-k", self.keep_emptied)
            .switch("-u", self.use_destination_message);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_rebase
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RebaseArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Rebase these revisions and their descendants
    #[serde(default)]
    pub source: Vec<String>,
    /// Rebase the whole branch relative to these revisions
    #[serde(default)]
    pub branch: Vec<String>,
    /// Rebase only these revisions
    #[serde(default)]
    pub revisions: Vec<String>,
    /// New parent revisions
    #[serde(default)]
    pub destination: Vec<String>,
    /// Insert the rebased revisions before these revisions
    #[serde(default)]
    pub insert_before: Vec<String>,
    /// Insert the rebased revisions after these revisions
    #[serde(default)]
    pub insert_after: Vec<String>,
}

impl RebaseArgs {
    fn has_target(&self) -> bool {
        [
            &self.source,
            &self.branch,
            &self.revisions,
            &self.destination,
            &self.insert_before,
            &self.insert_after,
        ]
        .iter()
        .any(|values| !values.is_empty())
    }
}

impl Action for RebaseArgs {
    const NAME: &'static str = "jj_rebase";
    const DESCRIPTION: &'static str = "Move revisions to different parents";

    fn invocation(self) -> Result<Invocation> {
        if !self.has_target() {
            return Err(Error::Validation(
                "At least one of source, branch, revisions, destination, insertBefore or insertAfter is required".to_string(),
            ));
        }

        let command = CommandLine::new(["rebase"])
            .repeated("-s", self.source)
            .repeated("-b", self.branch)
            .repeated("-r", self.revisions)
            .repeated("-d", self.destination)
            .repeated("--insert-before", self.insert_before)
            .repeated("--insert-after", self.insert_after);
        Invocation::new(self.working_directory, command)
    }
}
