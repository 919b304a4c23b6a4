//! MCP Server implementation
//!
//! The main server struct that coordinates MCP protocol handling with the
//! operation registry and the command runner.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use jj_command::CommandRunner;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::handlers::handle_tool_call;
use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, InitializeParams, InitializeResult,
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
    ReadResourceParams, ResourcesCapability, ServerCapabilities, ServerInfo, ToolCallParams,
    ToolsCapability,
};
use crate::registry::Registry;
use crate::resource_handlers::read_resource;
use crate::tools::ToolResult;
use crate::{Error, Result};

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "jujutsu";

/// MCP Server for Jujutsu
///
/// Requests are read one line at a time and answered in order. Tool calls
/// run their command through the configured [`CommandRunner`]; views run
/// against `root`.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use jj_command::JjExecutor;
/// use jj_mcp::JjMcpServer;
///
/// let mut server = JjMcpServer::new(".".into(), Arc::new(JjExecutor::default()));
/// server.run().await?;
/// ```
pub struct JjMcpServer {
    /// Directory views run in
    root: PathBuf,

    runner: Arc<dyn CommandRunner>,

    /// Populated by `initialize`
    registry: Registry,

    initialized: bool,
}

impl JjMcpServer {
    pub fn new(root: PathBuf, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            root,
            runner,
            registry: Registry::default(),
            initialized: false,
        }
    }

    /// Build the operation registry.
    pub async fn initialize(&mut self) -> Result<()> {
        tracing::info!(root = ?self.root, "Initializing MCP server");

        self.registry = Registry::builtin()?;
        self.initialized = true;

        tracing::debug!(
            tools = self.registry.tools().len(),
            resources = self.registry.resources().len(),
            "Registry built"
        );
        Ok(())
    }

    /// Run the MCP server over stdin/stdout.
    pub async fn run(&mut self) -> Result<()> {
        self.initialize().await?;

        tracing::info!("MCP server ready, listening on stdio");

        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Answer line-delimited messages from `reader` until it is exhausted.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            let response = match self.handle_message(&line).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to handle message");
                    let error_response =
                        JsonRpcResponse::error(None, INTERNAL_ERROR, format!("Internal error: {}", e));
                    serde_json::to_string(&error_response)?
                }
            };

            if !response.is_empty() {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Returns the JSON-RPC response as a string, or an empty string for
    /// notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                let response =
                    JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e));
                return serde_json::to_string(&response).map_err(Error::from);
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
            Ok(request) => request,
            Err(e) => {
                let id = value.get("id").filter(|id| !id.is_null()).cloned();
                let response =
                    JsonRpcResponse::error(id, INVALID_REQUEST, format!("Invalid Request: {}", e));
                return serde_json::to_string(&response).map_err(Error::from);
            }
        };

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return Ok(String::new());
        }

        let response = if request.jsonrpc != "2.0" {
            JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                format!("Invalid Request: unsupported jsonrpc version '{}'", request.jsonrpc),
            )
        } else {
            match request.method.as_str() {
                "initialize" => self.handle_initialize(request.id, request.params)?,
                "ping" => JsonRpcResponse::success(request.id, json!({})),
                "tools/list" => self.handle_tools_list(request.id),
                "tools/call" => self.handle_tools_call(request.id, request.params).await?,
                "resources/list" => self.handle_resources_list(request.id),
                "resources/read" => self.handle_resources_read(request.id, request.params).await,
                _ => JsonRpcResponse::error(
                    request.id,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {}", request.method),
                ),
            }
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    fn handle_initialize(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        if let Ok(params) = serde_json::from_value::<InitializeParams>(params) {
            let client = params.client_info.as_ref().map(|info| info.name.as_str());
            tracing::info!(
                client = client.unwrap_or("unknown"),
                protocol_version = %params.protocol_version,
                "Client connected"
            );
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: Some(ResourcesCapability {
                    subscribe: Some(false),
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<_> = self
            .registry
            .tools()
            .iter()
            .map(|tool| tool.definition())
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid params: {}", e),
                ));
            }
        };

        let tool_result = match handle_tool_call(
            &self.registry,
            self.runner.as_ref(),
            &params.name,
            params.arguments,
        )
        .await
        {
            Ok(result) => result,
            Err(e) => ToolResult::error(e.to_string()),
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(tool_result)?))
    }

    fn handle_resources_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let resources: Vec<_> = self
            .registry
            .resources()
            .iter()
            .map(|view| view.definition())
            .collect();

        JsonRpcResponse::success(id, json!({ "resources": resources }))
    }

    async fn handle_resources_read(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        let params: ReadResourceParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {}", e));
            }
        };

        match read_resource(&self.registry, self.runner.as_ref(), &self.root, &params.uri).await {
            Ok(content) => JsonRpcResponse::success(id, json!({ "contents": [content] })),
            Err(e) => JsonRpcResponse::error(id, INVALID_PARAMS, format!("Resource error: {}", e)),
        }
    }

    /// Directory views run in
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
