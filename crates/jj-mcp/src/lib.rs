//! MCP Server for Jujutsu
//!
//! This crate exposes the Jujutsu (`jj`) version-control CLI to agent hosts
//! via the Model Context Protocol. Each tool is a typed operation that
//! validates its arguments, builds one `jj` command line and runs it in the
//! requested repository.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (agent host) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ jj-mcp (server, registry, operations) ]
//!        | CommandLine
//!        v
//! [ jj-command (CommandRunner / JjExecutor) ]
//!        |
//!        +--> [ jj binary, run in the working directory ]
//! ```
//!
//! # Tools
//!
//! - Inspection and everyday editing (status, log, diff, show, commit,
//!   describe, new, edit, undo, op log)
//! - Bookmarks (list, create, delete, set, move)
//! - History rewriting (abandon, squash, rebase)
//! - Git interop (init, remotes, push, fetch)
//!
//! # Resources
//!
//! - `jujutsu://version` - version of the `jj` binary
//! - `jujutsu://info` - status and recent log of the server's root directory

pub mod config;
pub mod error;
pub mod handlers;
pub mod operations;
pub mod protocol;
pub mod registry;
pub mod resource_handlers;
pub mod resources;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use registry::{Registry, ToolSpec};
pub use resources::{ResourceContent, ResourceDefinition, View};
pub use server::JjMcpServer;
pub use tools::{ToolContent, ToolDefinition, ToolResult};
