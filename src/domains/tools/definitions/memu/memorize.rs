//! memU memorize tool.
//!
//! Submits a conversation for asynchronous memorization. The API answers
//! immediately with a task id; extraction and storage happen remotely and
//! can be followed with `memu_memorize_status`.

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
use crate::domains::memu::types::MemorizeResponse;
use crate::domains::memu::{ConversationMessage, MemuClient};
use crate::domains::tools::ToolError;

/// Smallest conversation the tool accepts.
pub const MIN_MESSAGES: usize = 3;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the memorize tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MemuMemorizeParams {
    /// The conversation to memorize, in dialogue order.
    #[schemars(description = "Conversation to memorize, in dialogue order (at least 3 messages)")]
    #[schemars(length(min = 3))]
    pub conversation: Vec<ConversationMessage>,

    /// ISO 8601 date of the session. Defaults to the current time.
    #[schemars(description = "ISO 8601 session date (defaults to now)")]
    #[serde(default)]
    pub session_date: Option<String>,
}

impl MemuMemorizeParams {
    /// Check the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ToolError> {
        if self.conversation.len() < MIN_MESSAGES {
            return Err(ToolError::invalid_arguments(format!(
                "conversation must contain at least {} messages, got {}",
                MIN_MESSAGES,
                self.conversation.len()
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Memorize tool - enqueues a conversation for memory extraction.
pub struct MemuMemorizeTool;

impl MemuMemorizeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "memu_memorize";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Save a conversation to memU long-term memory. \
        Send at least 3 messages (role 'user' or 'assistant') in dialogue order. \
        Memorization runs asynchronously: the result contains a task ID that can be \
        checked with memu_memorize_status.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(messages = params.conversation.len()))]
    pub async fn execute(params: &MemuMemorizeParams, client: &MemuClient) -> CallToolResult {
        info!("Memorize tool called");

        match client
            .memorize(&params.conversation, params.session_date.as_deref())
            .await
        {
            Ok(value) => {
                let summary = Self::format_response(&value, params.conversation.len());
                structured_result(summary, value)
            }
            Err(e) => api_error_result("Memorize", &e),
        }
    }

    /// Render the API response for the calling agent.
    pub fn format_response(value: &Value, message_count: usize) -> String {
        let response: MemorizeResponse =
            serde_json::from_value(value.clone()).unwrap_or_default();

        let mut text = format!(
            "Conversation submitted for memorization ({} messages).\n",
            message_count
        );

        match non_empty(&response.task_id) {
            Some(task_id) => {
                text.push_str(&format!("Task ID: {}\n", task_id));
                if let Some(status) = non_empty(&response.status) {
                    text.push_str(&format!("Status: {}\n", format_status(status)));
                }
                text.push_str(
                    "\nMemorization runs in the background. \
                     Check progress with memu_memorize_status.",
                );
            }
            None => {
                text.push_str("\nResponse:\n");
                text.push_str(&raw_dump(value));
            }
        }

        text
    }

    /// Parse, validate and execute a call.
    pub async fn call(arguments: JsonObject, client: &MemuClient) -> Result<CallToolResult, ToolError> {
        let params: MemuMemorizeParams = parse_params(arguments)?;
        params.validate()?;
        Ok(Self::execute(&params, client).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<MemuMemorizeParams>().into(),
            annotations: Some(annotations(false, false, false)),
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Memorize conversation".into()),
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

// ============================================================================
// Tests
// ============================================================================
