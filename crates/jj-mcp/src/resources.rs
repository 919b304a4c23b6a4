//! MCP resource definitions
//!
//! Resources are read-only views of the repository the server was started
//! in.
//!
//! | URI | Description | Content-Type |
//! |-----|-------------|--------------|
//! | `jujutsu://version` | Output of `jj --version` | text/plain |
//! | `jujutsu://info` | Working copy status and recent log | text/plain |

use serde::{Deserialize, Serialize};

/// Number of log entries included in the info view
pub const INFO_LOG_LIMIT: u32 = 10;

/// Log template used by the info view
pub const INFO_LOG_TEMPLATE: &str = "builtin_log_compact";

/// A read-only view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Version,
    Info,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Version => "version",
            View::Info => "info",
        }
    }

    pub fn uri(self) -> &'static str {
        match self {
            View::Version => "jujutsu://version",
            View::Info => "jujutsu://info",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Version => "Jujutsu Version",
            View::Info => "Repository Info",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            View::Version => "Version of the jj binary the server runs",
            View::Info => "Working copy status followed by the most recent changes",
        }
    }

    /// The entry published by `resources/list`.
    pub fn definition(self) -> ResourceDefinition {
        ResourceDefinition {
            uri: self.uri().to_string(),
            name: self.name().to_string(),
            title: self.title().to_string(),
            description: self.description().to_string(),
            mime_type: "text/plain".to_string(),
        }
    }
}

/// Views in registration order.
pub fn views() -> Vec<View> {
    vec![View::Version, View::Info]
}

/// Resource definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    pub uri: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub mime_type: String,
}

/// Content of a read view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl ResourceContent {
    pub fn text(view: View, text: impl Into<String>) -> Self {
        Self {
            uri: view.uri().to_string(),
            mime_type: "text/plain".to_string(),
            kind: "text",
            text: text.into(),
        }
    }
}
