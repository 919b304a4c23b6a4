//! Server configuration
//!
//! Settings come from an optional TOML file, overridden field by field by
//! command-line flags (which themselves fall back to `JJ_MCP_*` environment
//! variables).
//!
//! ```toml
//! root = "/home/user/project"
//!
//! [jj]
//! binary = "/usr/local/bin/jj"
//! timeout_secs = 60
//! exec_mode = "direct"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jj_command::{ExecMode, ExecutorConfig};
use serde::Deserialize;

use crate::Result;

/// `[jj]` section: how the binary is run
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JjSection {
    /// Path or name of the `jj` binary
    #[serde(default)]
    pub binary: Option<PathBuf>,

    /// Per-command timeout; `0` disables it
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub exec_mode: Option<ExecMode>,
}

/// Complete server configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Directory views run in
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub jj: JjSection,
}

impl ServerConfig {
    /// Parse configuration from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Apply `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merge(self, overrides: ServerConfig) -> Self {
        Self {
            root: overrides.root.or(self.root),
            jj: JjSection {
                binary: overrides.jj.binary.or(self.jj.binary),
                timeout_secs: overrides.jj.timeout_secs.or(self.jj.timeout_secs),
                exec_mode: overrides.jj.exec_mode.or(self.jj.exec_mode),
            },
        }
    }

    /// Root directory, defaulting to the current directory
    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn executor_config(&self) -> ExecutorConfig {
        let defaults = ExecutorConfig::default();
        ExecutorConfig {
            binary: self.jj.binary.clone().unwrap_or(defaults.binary),
            mode: self.jj.exec_mode.unwrap_or(defaults.mode),
            timeout: match self.jj.timeout_secs {
                None | Some(0) => defaults.timeout,
                Some(secs) => Some(Duration::from_secs(secs)),
            },
        }
    }
}
