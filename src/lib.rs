//! memU MCP Server Library
//!
//! This crate exposes the memU memory API as Model Context Protocol (MCP)
//! tools over stdio, so an AI coding assistant can save conversations,
//! search memories, list categories and delete memories.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and the
//!   stdio transport
//! - **domains**: business logic organized by bounded contexts
//!   - **memu**: the memU REST API adapter
//!   - **tools**: the MCP tools built on top of it
//!
//! # Example
//!
//! ```rust,no_run
//! use memu_mcp_server::core::{Config, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};
