//! memU memorize status tool.
//!
//! Reads the remote state of a memorize task. Safe to poll; the tool never
//! retries or waits on its own.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{
    annotations, api_error_result, format_status, non_empty, parse_params, raw_dump,
    structured_result,
};
use crate::domains::memu::MemuClient;
use crate::domains::memu::types::TaskStatusResponse;
use crate::domains::tools::ToolError;

/// Parameters for the memorize status tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MemuMemorizeStatusParams {
    /// Task ID returned by memu_memorize.
    #[schemars(description = "Task ID returned by memu_memorize")]
    pub task_id: String,
}

/// Memorize status tool - polls a memorize task.
pub struct MemuMemorizeStatusTool;

impl MemuMemorizeStatusTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "memu_memorize_status";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Check the status of a memorization task started by \
        memu_memorize. Status is one of PENDING, PROCESSING, SUCCESS or FAILED. \
        This is a read-only call and can be repeated until the task finishes.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(task_id = %params.task_id))]
    pub async fn execute(params: &MemuMemorizeStatusParams, client: &MemuClient) -> CallToolResult {
        info!("Memorize status tool called");

        match client.memorize_status(&params.task_id).await {
            Ok(value) => {
                let summary = Self::format_response(&params.task_id, &value);
                structured_result(summary, value)
            }
            Err(e) => api_error_result("Memorize status", &e),
        }
    }

    /// Render the task state: status, then creation and completion times.
    pub fn format_response(task_id: &str, value: &Value) -> String {
        let Ok(response) = serde_json::from_value::<TaskStatusResponse>(value.clone()) else {
            return format!("Task {}\n\n{}", task_id, raw_dump(value));
        };

        let mut text = format!("Task {}\n", task_id);
        let status = non_empty(&response.status).unwrap_or("UNKNOWN");
        text.push_str(&format!("Status: {}\n", format_status(status)));

        if let Some(created_at) = non_empty(&response.created_at) {
            text.push_str(&format!("Created: {}\n", created_at));
        }
        if let Some(completed_at) = non_empty(&response.completed_at) {
            text.push_str(&format!("Completed: {}\n", completed_at));
        }

        text
    }

    /// Parse, validate and execute a call.
    pub async fn call(arguments: JsonObject, client: &MemuClient) -> Result<CallToolResult, ToolError> {
        let params: MemuMemorizeStatusParams = parse_params(arguments)?;
        if params.task_id.trim().is_empty() {
            return Err(ToolError::invalid_arguments("task_id must not be empty"));
        }
        Ok(Self::execute(&params, client).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<MemuMemorizeStatusParams>().into(),
            annotations: Some(annotations(true, false, true)),
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Memorization status".into()),
        }
    }

    /// Create a ToolRoute for the rmcp router.
    pub fn create_route<S>(client: Arc<MemuClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move { Self::call(args, &client).await.map_err(McpError::from) }.boxed()
        })
    }
}
