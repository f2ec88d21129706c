//! Error types for tool dispatch.

use thiserror::Error;
use tick_dates::DateError;

/// Errors a tool call can end in. All of them are reported back to the agent
/// as an `isError` tool result rather than a JSON-RPC error.
#[derive(Error, Debug)]
pub enum ToolError {
    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The argument bag does not match the tool's input contract
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// The date core rejected the request
    #[error(transparent)]
    Date(#[from] DateError),

    /// The handler result could not be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ToolError>;
