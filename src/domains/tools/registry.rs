//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The list of all available tools and their metadata
//! - Name-based dispatch of a tool call, independent of the transport
//!
//! MCP sessions never reach [`ToolRegistry::call_tool`]: the host's calls go
//! through the rmcp router from `build_tool_router`. The name dispatcher is
//! the entry point for in-process callers such as `McpServer::call_tool`
//! and embedding applications.

use std::sync::Arc;
use tracing::warn;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde_json::Value;

use super::ToolError;
use super::definitions::{
    MemuCategoriesTool, MemuDeleteTool, MemuMemorizeStatusTool, MemuMemorizeTool,
    MemuRetrieveTool,
};
use crate::domains::memu::MemuClient;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    client: Arc<MemuClient>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: Arc<MemuClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            MemuMemorizeTool::NAME,
            MemuMemorizeStatusTool::NAME,
            MemuRetrieveTool::NAME,
            MemuCategoriesTool::NAME,
            MemuDeleteTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            MemuMemorizeTool::to_tool(),
            MemuMemorizeStatusTool::to_tool(),
            MemuRetrieveTool::to_tool(),
            MemuCategoriesTool::to_tool(),
            MemuDeleteTool::to_tool(),
        ]
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Arguments must be a JSON object; `null` is treated as no arguments.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<CallToolResult, ToolError> {
        let arguments = match arguments {
            Value::Object(map) => map,
            Value::Null => JsonObject::new(),
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "arguments must be an object, got {}",
                    other
                )));
            }
        };

        let client = self.client.as_ref();
        match name {
            MemuMemorizeTool::NAME => MemuMemorizeTool::call(arguments, client).await,
            MemuMemorizeStatusTool::NAME => MemuMemorizeStatusTool::call(arguments, client).await,
            MemuRetrieveTool::NAME => MemuRetrieveTool::call(arguments, client).await,
            MemuCategoriesTool::NAME => MemuCategoriesTool::call(arguments, client).await,
            MemuDeleteTool::NAME => MemuDeleteTool::call(arguments, client).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
