//! memU categories tool.
//!
//! Lists the memory categories memU has built for this user and agent.

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
    annotations, api_error_result, non_empty, parse_params, raw_dump, structured_result,
};
use crate::domains::memu::MemuClient;
use crate::domains::memu::types::CategoriesResponse;
use crate::domains::tools::ToolError;

/// Text returned when no category exists yet.
pub const NO_CATEGORIES_TEXT: &str = "No memory categories yet.";

/// Parameters for the categories tool (none).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MemuCategoriesParams {}

/// Categories tool - lists memory categories.
pub struct MemuCategoriesTool;

impl MemuCategoriesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "memu_categories";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List the memory categories memU has organised for \
        this user, with their descriptions and generated summaries.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(_params: &MemuCategoriesParams, client: &MemuClient) -> CallToolResult {
        info!("Categories tool called");

        match client.categories().await {
            Ok(value) => {
                let summary = Self::format_response(&value);
                structured_result(summary, value)
            }
            Err(e) => api_error_result("Categories", &e),
        }
    }

    /// Render the category list.
    pub fn format_response(value: &Value) -> String {
        if value.is_null() {
            return NO_CATEGORIES_TEXT.to_string();
        }
        let Ok(response) = serde_json::from_value::<CategoriesResponse>(value.clone()) else {
            return raw_dump(value);
        };

        // Nameless categories cannot be referred to; leave them out.
        let categories: Vec<_> = response
            .categories
            .unwrap_or_default()
            .into_iter()
            .filter(|category| non_empty(&category.name).is_some())
            .collect();
        if categories.is_empty() {
            return NO_CATEGORIES_TEXT.to_string();
        }

        let mut text = format!("## Memory Categories ({})\n", categories.len());
        for category in &categories {
            let name = non_empty(&category.name).unwrap_or_default();
            text.push_str(&format!("\n- **{}**", name));
            if let Some(description) = non_empty(&category.description) {
                text.push_str(&format!("\n  {}", description));
            }
            if let Some(summary) = non_empty(&category.summary) {
                text.push_str(&format!("\n  Summary: {}", summary));
            }
        }
        text
    }

    /// Parse and execute a call.
    pub async fn call(arguments: JsonObject, client: &MemuClient) -> Result<CallToolResult, ToolError> {
        let params: MemuCategoriesParams = parse_params(arguments)?;
        Ok(Self::execute(&params, client).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<MemuCategoriesParams>().into(),
            annotations: Some(annotations(true, false, true)),
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("List memory categories".into()),
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
