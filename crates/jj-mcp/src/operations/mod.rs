//! Operation definitions
//!
//! Every tool is a typed argument struct implementing [`Action`]. The struct
//! is the tool's input contract: its fields, their types, defaults and
//! descriptions produce the published JSON schema, and unknown fields are
//! rejected when a call is decoded. [`Action::invocation`] turns validated
//! arguments into an [`Invocation`] without running anything.
//!
//! Operations are grouped by category; the registry concatenates the groups
//! in this order:
//!
//! - [`basic`] - inspection and everyday change editing
//! - [`bookmark`] - bookmark management
//! - [`history`] - history rewriting (abandon, squash, rebase)
//! - [`remote`] - git interop (init, remotes, push, fetch)

pub mod basic;
pub mod bookmark;
pub mod history;
pub mod remote;

use std::path::PathBuf;

use jj_command::CommandLine;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

/// A tool backed by a single `jj` command
pub trait Action: DeserializeOwned + JsonSchema {
    /// Tool name as published to the host
    const NAME: &'static str;

    /// One-line description shown to the agent
    const DESCRIPTION: &'static str;

    /// Validate the arguments and build the command to run.
    fn invocation(self) -> Result<Invocation>;
}

/// A command ready to run in a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub working_directory: PathBuf,
    pub command: CommandLine,
}

impl Invocation {
    /// Pair a command with its working directory.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if `working_directory` is not absolute.
    pub fn new(working_directory: PathBuf, command: CommandLine) -> Result<Self> {
        if !working_directory.is_absolute() {
            return Err(Error::Validation(format!(
                "workingDirectory must be an absolute path, got '{}'",
                working_directory.display()
            )));
        }
        Ok(Self {
            working_directory,
            command,
        })
    }
}

/// Decode tool arguments into an operation's argument struct.
///
/// A missing `arguments` object is treated as `{}` so that tools whose only
/// field is optional can be called bare; required fields still fail.
pub fn parse_arguments<A: DeserializeOwned>(arguments: Value) -> Result<A> {
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| Error::InvalidArguments {
        message: e.to_string(),
    })
}

/// Reject positional values that `jj` would parse as a flag.
fn ensure_not_flag(field: &str, value: &str) -> Result<()> {
    if value.starts_with('-') {
        return Err(Error::Validation(format!(
            "{} must not start with '-' (would be interpreted as a flag): '{}'",
            field, value
        )));
    }
    Ok(())
}

/// [`ensure_not_flag`] for every value of a list field.
fn ensure_none_flags(field: &str, values: &[String]) -> Result<()> {
    values.iter().try_for_each(|value| ensure_not_flag(field, value))
}

fn default_true() -> bool {
    true
}

fn default_revision() -> String {
    "@".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Probe {
        #[serde(default)]
        name: Option<String>,
    }

    #[test]
    fn test_null_arguments_decode_as_empty_object() {
        let probe: Probe = parse_arguments(Value::Null).unwrap();
        assert!(probe.name.is_none());
    }

    #[test]
    fn test_unknown_fields_are_invalid_arguments() {
        let result: Result<Probe> = parse_arguments(json!({"nmae": "typo"}));
        match result {
            Err(Error::InvalidArguments { message }) => assert!(message.contains("nmae")),
            other => panic!("Expected InvalidArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_relative_working_directory_rejected() {
        let result = Invocation::new(PathBuf::from("repo"), CommandLine::new(["status"]));
        assert!(matches!(result, Err(Error::Validation(msg)) if msg.contains("absolute")));
    }

    #[test]
    fn test_flag_like_positional_rejected() {
        assert!(ensure_not_flag("name", "--all").is_err());
        assert!(ensure_not_flag("name", "feature-x").is_ok());
        assert!(ensure_none_flags("paths", &["src".into(), "-r".into()]).is_err());
    }
}
