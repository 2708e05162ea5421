//! MCP Server implementation and lifecycle management.
//!
//! This module contains the protocol handler. It exposes the memU tools
//! through an rmcp `ToolRouter` and carries no other capability.
//!
//! Tools are defined in `domains/tools/definitions/memu/`, one file per tool.
//! **Adding a new tool does NOT require modifying this file.**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Error;
use crate::domains::memu::MemuClient;
use crate::domains::tools::{ToolError, ToolRegistry, build_tool_router};

/// The main MCP server handler.
///
/// Cloned per connection by rmcp; all state is shared through `Arc`.
#[derive(Clone)]
pub struct McpServer {
    /// Name-based dispatcher over the same tools as the router, for callers
    /// that run the server in-process without a protocol session.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if the memU client cannot be built (e.g. an unusable base URL).
    pub fn new(config: Config) -> Result<Self, Error> {
        let client = MemuClient::new(&config.memu)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a server around an existing client.
    pub fn with_client(config: Config, client: MemuClient) -> Self {
        let client = Arc::new(client);

        info!(
            "memU client ready (base URL: {}, agent: {})",
            config.memu.base_url,
            client.agent_id()
        );

        Self {
            tool_router: build_tool_router::<Self>(client.clone()),
            registry: Arc::new(ToolRegistry::new(client)),
        }
    }

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Call a tool by name, outside of any protocol session.
    ///
    /// Protocol sessions dispatch through the tool router instead; both paths
    /// end in the same per-tool `call` function.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        self.registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Long-term memory backed by memU. Use memu_retrieve to recall what is known \
                 about the user, memu_memorize to save a finished conversation (then \
                 memu_memorize_status to follow the task), and memu_categories for an \
                 overview. memu_delete is irreversible: ask the user first."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
