//! Tick MCP server binary
//!
//! ## Usage
//!
//! ```bash
//! # Run as MCP server (stdio)
//! tick-mcp
//!
//! # Verbose logging to stderr
//! tick-mcp --log-filter tick_mcp=debug
//!
//! # Pin the clock, e.g. for reproducible transcripts
//! TICK_MCP_FIXED_NOW=2024-01-15T09:00:00Z tick-mcp
//! ```

use anyhow::Context;
use clap::Parser;
use tick_mcp::{ServerConfig, TickMcpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_filter))
                .with_context(|| format!("invalid log filter '{}'", config.log_filter))?,
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        server_name = %config.server_name,
        fixed_clock = config.fixed_now.is_some(),
        "starting Tick MCP server"
    );

    let server = TickMcpServer::new(&config);
    server.run_stdio().context("stdio transport failed")?;

    Ok(())
}
