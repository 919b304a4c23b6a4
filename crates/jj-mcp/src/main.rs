//! Jujutsu MCP Server
//!
//! A Model Context Protocol server that exposes the `jj` CLI to agent hosts.
//!
//! # Usage
//!
//! ```bash
//! jj-mcp [--root <path>] [--config <file>] [--jj-binary <path>]
//!        [--timeout-secs <n>] [--exec-mode direct|shell]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `jj_mcp=info,jj_command=info`)
//! - `JJ_MCP_ROOT`, `JJ_MCP_CONFIG`, `JJ_MCP_JJ_BINARY`, `JJ_MCP_TIMEOUT_SECS`,
//!   `JJ_MCP_EXEC_MODE`: fallbacks for the matching flags
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use jj_command::{ExecMode, JjExecutor};
use jj_mcp::config::JjSection;
use jj_mcp::{JjMcpServer, ServerConfig};

/// MCP server for Jujutsu
#[derive(Parser)]
#[command(name = "jj-mcp")]
#[command(about = "MCP server exposing the Jujutsu (jj) CLI")]
#[command(version)]
struct Args {
    /// Directory the resources are read from
    #[arg(short, long, env = "JJ_MCP_ROOT")]
    root: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "JJ_MCP_CONFIG")]
    config: Option<PathBuf>,

    /// Path or name of the jj binary
    #[arg(long, env = "JJ_MCP_JJ_BINARY")]
    jj_binary: Option<PathBuf>,

    /// Per-command timeout in seconds (0 disables it)
    #[arg(long, env = "JJ_MCP_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// How commands are handed to the OS: direct or shell
    #[arg(long, env = "JJ_MCP_EXEC_MODE")]
    exec_mode: Option<ExecMode>,
}

impl Args {
    fn overrides(&self) -> ServerConfig {
        ServerConfig {
            root: self.root.clone(),
            jj: JjSection {
                binary: self.jj_binary.clone(),
                timeout_secs: self.timeout_secs,
                exec_mode: self.exec_mode,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jj_mcp=info".parse()?)
                .add_directive("jj_command=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    let config = file_config.merge(args.overrides());
    let executor = config.executor_config();

    tracing::info!(
        root = ?config.root(),
        binary = ?executor.binary,
        mode = %executor.mode,
        timeout = ?executor.timeout,
        "Starting jj-mcp server"
    );

    let mut server = JjMcpServer::new(config.root(), Arc::new(JjExecutor::new(executor)));
    server.run().await?;

    Ok(())
}
