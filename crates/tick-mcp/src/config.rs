//! Server configuration.
//!
//! Built once in `main` from command-line flags (each also readable from an
//! environment variable) and passed to [`crate::TickMcpServer::new`].

use chrono::{DateTime, Utc};
use clap::Parser;

use crate::clock::{Clock, FixedClock, SystemClock};

pub const DEFAULT_SERVER_NAME: &str = "tick-api-mcp-server";
pub const DEFAULT_LOG_FILTER: &str = "tick_mcp=info";

#[derive(Parser, Debug, Clone)]
#[command(name = "tick-mcp", author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Name reported to clients in the `initialize` handshake
    #[arg(long, env = "TICK_MCP_SERVER_NAME", default_value = DEFAULT_SERVER_NAME)]
    pub server_name: String,

    /// Log filter directive (e.g. `tick_mcp=debug`). `RUST_LOG` takes precedence
    #[arg(long, env = "TICK_MCP_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,

    /// Pin "now" to a fixed RFC 3339 instant instead of the system clock
    #[arg(long, env = "TICK_MCP_FIXED_NOW", value_parser = parse_instant)]
    pub fixed_now: Option<DateTime<Utc>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            fixed_now: None,
        }
    }
}

impl ServerConfig {
    /// The clock tool calls should read.
    pub fn clock(&self) -> Box<dyn Clock> {
        match self.fixed_now {
            Some(instant) => Box::new(FixedClock(instant)),
            None => Box::new(SystemClock),
        }
    }
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("'{s}' is not an RFC 3339 timestamp: {e}"))
}
