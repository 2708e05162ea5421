//! memU delete tool.
//!
//! Deletes memories for the configured user. Without `agent_id` the request
//! covers the user's memories across all agents. Deletion is irreversible;
//! there is no confirmation step in this layer.

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
use tracing::{instrument, warn};

use super::common::{annotations, api_error_result, parse_params, raw_dump, structured_result};
use crate::domains::memu::MemuClient;
use crate::domains::tools::ToolError;

/// Parameters for the delete tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MemuDeleteParams {
    /// Limit deletion to one agent. Omit to delete across all agents.
    #[schemars(description = "Only delete memories stored by this agent. Omit to delete ALL of the user's memories")]
    #[serde(default)]
    pub agent_id: Option<String>,
}

/// Delete tool - removes memories.
pub struct MemuDeleteTool;

impl MemuDeleteTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "memu_delete";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Delete memories from memU. DESTRUCTIVE AND IRREVERSIBLE: \
        always ask the user for explicit confirmation before calling this tool. \
        Without agent_id, every memory of the user across all agents is deleted.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(agent_id = ?params.agent_id))]
    pub async fn execute(params: &MemuDeleteParams, client: &MemuClient) -> CallToolResult {
        let agent_id = params.agent_id.as_deref();
        match agent_id {
            Some(agent) => warn!("Deleting memories for agent '{}'", agent),
            None => warn!("Deleting memories across all agents"),
        }

        match client.delete(agent_id).await {
            Ok(value) => {
                let summary = Self::format_response(agent_id, &value);
                structured_result(summary, value)
            }
            Err(e) => api_error_result("Delete", &e),
        }
    }

    /// Render the raw API result under a short heading.
    pub fn format_response(agent_id: Option<&str>, value: &Value) -> String {
        let scope = match agent_id {
            Some(agent) => format!("agent '{}'", agent),
            None => "all agents".to_string(),
        };

        if value.is_null() {
            return format!("Memories deleted ({}).", scope);
        }
        format!("Memories deleted ({}).\n\n{}", scope, raw_dump(value))
    }

    /// Parse, validate and execute a call.
    ///
    /// A blank `agent_id` is rejected rather than widened to all agents.
    pub async fn call(arguments: JsonObject, client: &MemuClient) -> Result<CallToolResult, ToolError> {
        let params: MemuDeleteParams = parse_params(arguments)?;
        if params.agent_id.as_deref().is_some_and(|agent| agent.trim().is_empty()) {
            return Err(ToolError::invalid_arguments(
                "agent_id must not be empty; omit it to delete across all agents",
            ));
        }
        Ok(Self::execute(&params, client).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<MemuDeleteParams>().into(),
            annotations: Some(annotations(false, true, true)),
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Delete memories".into()),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::memu::CredentialSource;
    use crate::domains::memu::testing::{TEST_USER, mock_client};
    use crate::domains::tools::definitions::memu::common::text_of;
    use serde_json::json;
    use wiremock::matchers::{any, body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_delete_all_sends_only_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v3/memory/delete"))
            .and(body_json(json!({"user_id": TEST_USER})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted_count": 12})))
            .expect(1)
            .mount(&server)
            .await;
        let client = mock_client(&server.uri());

        let result = MemuDeleteTool::call(JsonObject::new(), &client).await.unwrap();
        let text = text_of(&result);
        assert!(text.starts_with("Memories deleted (all agents)."));
        assert!(text.contains("\"deleted_count\": 12"));
    }

    #[tokio::test]
    async fn test_delete_scoped_to_agent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v3/memory/delete"))
            .and(body_json(json!({"user_id": TEST_USER, "agent_id": "notes_bot"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("ok")))
            .expect(1)
            .mount(&server)
            .await;
        let client = mock_client(&server.uri());

        let mut args = JsonObject::new();
        args.insert("agent_id".into(), json!("notes_bot"));
        let result = MemuDeleteTool::call(args, &client).await.unwrap();
        assert_eq!(text_of(&result), "Memories deleted (agent 'notes_bot').\n\nok");
        assert!(result.structured_content.is_none());
    }

    #[tokio::test]
    async fn test_blank_agent_id_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let client = mock_client(&server.uri());

        for blank in ["", "   "] {
            let mut args = JsonObject::new();
            args.insert("agent_id".into(), json!(blank));
            let err = MemuDeleteTool::call(args, &client).await.unwrap_err();
            assert!(matches!(err, ToolError::InvalidArguments(_)));
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_without_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let client = mock_client(&server.uri()).with_credentials(CredentialSource::Fixed {
            api_key: None,
            user_id: Some(TEST_USER.into()),
        });

        let result = MemuDeleteTool::call(JsonObject::new(), &client).await.unwrap();
        assert!(result.is_error.unwrap_or(false));
        assert!(text_of(&result).contains("Configuration error: MEMU_API_KEY"));
    }

    #[test]
    fn test_description_requires_confirmation() {
        assert!(MemuDeleteTool::DESCRIPTION.contains("confirmation"));
        let tool = MemuDeleteTool::to_tool();
        assert_eq!(tool.annotations.unwrap().destructive_hint, Some(true));
    }
}
