//! # tick-mcp
//!
//! Model Context Protocol server for Tick time tracking.
//!
//! Exposes the [`tick_dates`] helpers as MCP tools so an agent can turn
//! "this week" or "last Monday" into the `YYYY-MM-DD` dates the Tick API
//! expects before it logs or queries entries.
//!
//! ## Tools
//!
//! | Tool | Purpose |
//! |------|---------|
//! | `get_current_date` | Today's date, weekday and month, from the server clock |
//! | `format_date_range` | Symbolic ranges such as `this_week` or `last_month` |
//! | `parse_relative_date` | Phrases such as "yesterday" or "next Monday" |
//!
//! ## Modules
//!
//! - [`server`] — JSON-RPC over stdio
//! - [`tools`] — the tool table and handlers
//! - [`config`] — command-line / environment configuration
//! - [`clock`] — where "now" comes from
//! - [`error`] — tool error types

pub mod clock;
pub mod config;
pub mod error;
pub mod server;
pub mod tools;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ServerConfig;
pub use error::ToolError;
pub use server::{McpRequest, McpResponse, TickMcpServer};
pub use tools::{call_tool, find_tool, tool_definitions, ToolResult, ToolSpec, TOOLS};
