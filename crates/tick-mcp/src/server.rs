//! MCP server protocol implementation
//!
//! Newline-delimited JSON-RPC 2.0 over stdio. One request is handled at a time;
//! each request with an `id` gets exactly one response line, notifications get
//! none.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::clock::Clock;
use crate::config::ServerConfig;
use crate::tools::{call_tool, tool_definitions};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// MCP JSON-RPC request
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// MCP JSON-RPC response
#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
}

impl McpResponse {
    pub fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// The Tick MCP server: tool table plus the clock tool calls read from.
pub struct TickMcpServer {
    name: String,
    clock: Box<dyn Clock>,
}

impl TickMcpServer {
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_clock(config.server_name.clone(), config.clock())
    }

    pub fn with_clock(name: impl Into<String>, clock: Box<dyn Clock>) -> Self {
        Self {
            name: name.into(),
            clock,
        }
    }

    /// Run the MCP server over stdio
    pub fn run_stdio(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve newline-delimited requests from `input` until it is exhausted.
    pub fn serve<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line) {
                writeln!(output, "{}", serde_json::to_string(&response)?)?;
                output.flush()?;
            }
        }

        tracing::info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one raw line of input.
    pub fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable request line");
                return Some(McpResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<McpRequest>(value) {
            Ok(request) => self.handle_request(request),
            Err(e) => Some(McpResponse::error(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {e}"),
            )),
        }
    }

    /// Handle an MCP request. Notifications (no `id`) produce no response.
    pub fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        tracing::debug!(method = %request.method, "handling request");

        if request.jsonrpc != JSONRPC_VERSION {
            tracing::warn!(version = %request.jsonrpc, "unsupported jsonrpc version");
            return request.id.map(|id| {
                McpResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid request: unsupported jsonrpc version '{}'", request.jsonrpc),
                )
            });
        }

        let Some(id) = request.id else {
            tracing::debug!(method = %request.method, "notification received");
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => McpResponse::result(id, self.handle_initialize()),
            "ping" => McpResponse::result(id, json!({})),
            "tools/list" => McpResponse::result(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params),
            other => McpResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {other}")),
        };
        Some(response)
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": self.name,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn handle_tools_call(&self, id: Value, params: Value) -> McpResponse {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return McpResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid params for tools/call: {e}"),
                );
            }
        };

        tracing::debug!(tool = %params.name, "calling tool");
        let now = self.clock.now();
        let result = call_tool(&params.name, params.arguments, now);

        match serde_json::to_value(result) {
            Ok(value) => McpResponse::result(id, value),
            Err(e) => McpResponse::error(id, INTERNAL_ERROR, format!("Internal error: {e}")),
        }
    }
}
