//! memU MCP Server Entry Point
//!
//! Initializes logging, loads configuration, and serves the memU tools over
//! stdin/stdout. Any startup failure is logged and ends the process with a
//! non-zero exit status.

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{Level, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use memu_mcp_server::core::config::LoggingConfig;
use memu_mcp_server::core::{Config, McpServer, StdioTransport};
use memu_mcp_server::domains::memu::Credentials;

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<()> {
    info!("Starting {} v{}", config.server.name, config.server.version);

    config.validate().context("invalid configuration")?;

    // Credentials are checked again on every call; this only warns early.
    if let Err(e) = Credentials::from_env() {
        warn!("{} - every tool call will fail until it is set", e);
    }

    let server = McpServer::new(config).context("failed to create server")?;

    info!("Server initialized");

    StdioTransport::run(server)
        .await
        .context("transport failed")?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout is reserved for the protocol.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
