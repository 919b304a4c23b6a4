//! Bookmark management

use std::path::PathBuf;

use jj_command::CommandLine;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{Action, Invocation, ensure_none_flags, ensure_not_flag};
use crate::registry::ToolSpec;
use crate::{Error, Result};

/// Tools in this group, in registration order.
pub fn tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::of::<BookmarkArgs>(),
        ToolSpec::of::<BookmarkSetArgs>(),
        ToolSpec::of::<BookmarkMoveArgs>(),
    ]
}

/// What jj_bookmark should do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkAction {
    List,
    Create,
    Delete,
}

impl BookmarkAction {
    pub fn as_str(self) -> &'static str {
        match self {
            BookmarkAction::List => "list",
            BookmarkAction::Create => "create",
            BookmarkAction::Delete => "delete",
        }
    }
}

/// Arguments for jj_bookmark
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookmarkArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Action to perform
    pub action: BookmarkAction,
    /// Bookmark name (required for create and delete)
    #[serde(default)]
    pub name: Option<String>,
    /// Revision the new bookmark points to (create only)
    #[serde(default)]
    pub revision: Option<String>,
}

impl BookmarkArgs {
    fn required_name(&self) -> Result<String> {
        let name = self.name.clone().ok_or_else(|| {
            Error::Validation(format!(
                "Bookmark name is required for {} action",
                self.action.as_str()
            ))
        })?;
        ensure_not_flag("name", &name)?;
        Ok(name)
    }
}

impl Action for BookmarkArgs {
    const NAME: &'static str = "jj_bookmark";
    const DESCRIPTION: &'static str = "List, create or delete bookmarks";

    fn invocation(self) -> Result<Invocation> {
        if self.revision.is_some() && self.action != BookmarkAction::Create {
            return Err(Error::Validation(
                "revision is only accepted by the create action".to_string(),
            ));
        }

        let command = match self.action {
            BookmarkAction::List => CommandLine::new(["bookmark", "list"]),
            BookmarkAction::Create => {
                let name = self.required_name()?;
                CommandLine::new(["bookmark", "create"])
                    .arg(name)
                    .option("-r", self.revision)
            }
            BookmarkAction::Delete => {
                let name = self.required_name()?;
                CommandLine::new(["bookmark", "delete"]).arg(name)
            }
        };
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_bookmark_set
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookmarkSetArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Bookmarks to create or update
    pub names: Vec<String>,
    /// Target revision (defaults to the working-copy change)
    #[serde(default)]
    pub revision: Option<String>,
    /// Allow moving bookmarks backwards or sideways
    #[serde(default)]
    pub allow_backwards: bool,
}

impl Action for BookmarkSetArgs {
    const NAME: &'static str = "jj_bookmark_set";
    const DESCRIPTION: &'static str = "Create or update bookmarks to point to a revision";

    fn invocation(self) -> Result<Invocation> {
        if self.names.is_empty() {
            return Err(Error::Validation(
                "At least one bookmark name is required".to_string(),
            ));
        }
        ensure_none_flags("names", &self.names)?;

        let command = CommandLine::new(["bookmark", "set"])
            .args(self.names)
            .option("-r", self.revision)
            .switch("-B", self.allow_backwards);
        Invocation::new(self.working_directory, command)
    }
}

/// Arguments for jj_bookmark_move
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookmarkMoveArgs {
    /// Absolute path of the repository
    pub working_directory: PathBuf,
    /// Bookmark names or patterns to move
    #[serde(default)]
    pub names: Vec<String>,
    /// Move bookmarks currently pointing at these revisions
    #[serde(default)]
    pub from: Vec<String>,
    /// Revision to move the bookmarks to
    pub to: String,
    /// Allow moving bookmarks backwards or sideways
    #[serde(default)]
    pub allow_backwards: bool,
}

impl Action for BookmarkMoveArgs {
    const NAME: &'static str = "jj_bookmark_move";
    const DESCRIPTION: &'static str = "Move existing bookmarks to another revision";

    fn invocation(self) -> Result<Invocation> {
        ensure_none_flags("names", &self.names)?;

        let command = CommandLine::new(["bookmark", "move"])
            .args(self.names)
            .repeated("-f", self.from)
            .arg("-t")
            .arg(self.to)
            .switch("-B", self.allow_backwards);
        Invocation::new(self.working_directory, command)
    }
}
