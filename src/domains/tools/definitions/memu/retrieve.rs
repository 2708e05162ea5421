//! memU retrieve tool.
//!
//! Semantic search over stored memories. The query is either plain text or a
//! list of conversation messages; in the latter case the API rewrites the
//! context into a search query first and reports the rewritten text.

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
use crate::domains::memu::types::{MemoryCategory, MemoryItem, Resource, RetrieveResponse};
use crate::domains::memu::{MemuClient, RetrieveQuery};
use crate::domains::tools::ToolError;

/// Text returned when the search matched nothing.
pub const NOT_FOUND_TEXT: &str = "No relevant memories found.";

/// Parameters for the retrieve tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MemuRetrieveParams {
    /// Plain text query, or conversation messages to derive a query from.
    #[schemars(
        description = "Search query: a text string, or an array of conversation messages \
                       ({role, content}) from which memU derives the query"
    )]
    pub query: RetrieveQuery,
}

/// Retrieve tool - searches memories.
pub struct MemuRetrieveTool;

impl MemuRetrieveTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "memu_retrieve";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search memU long-term memory. Pass a text query, \
        or recent conversation messages to let memU rewrite them into a query. \
        Returns matching categories, memory items and resources.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(params: &MemuRetrieveParams, client: &MemuClient) -> CallToolResult {
        match &params.query {
            RetrieveQuery::Text(text) => info!("Retrieve tool called with text query: {}", text),
            RetrieveQuery::Conversation(messages) => info!(
                "Retrieve tool called with {} conversation message(s)",
                messages.len()
            ),
        }

        match client.retrieve(&params.query).await {
            Ok(value) => {
                let summary = Self::format_response(&value);
                structured_result(summary, value)
            }
            Err(e) => api_error_result("Retrieve", &e),
        }
    }

    /// Render search results.
    ///
    /// Sections appear in a fixed order: rewritten query, categories, items,
    /// resources. Without any renderable category, item or resource the result ends with
    /// [`NOT_FOUND_TEXT`]; a completely empty response is exactly that text.
    pub fn format_response(value: &Value) -> String {
        if value.is_null() {
            return NOT_FOUND_TEXT.to_string();
        }
        let Ok(response) = serde_json::from_value::<RetrieveResponse>(value.clone()) else {
            return raw_dump(value);
        };

        let mut sections = Vec::new();

        if let Some(rewritten) = non_empty(&response.rewritten_query) {
            sections.push(format!("## Rewritten Query\n{}", rewritten));
        }

        let results: Vec<String> = [
            format_categories(&response.categories.unwrap_or_default()),
            format_items(&response.items.unwrap_or_default()),
            format_resources(&response.resources.unwrap_or_default()),
        ]
        .into_iter()
        .flatten()
        .collect();

        if results.is_empty() {
            sections.push(NOT_FOUND_TEXT.to_string());
        } else {
            sections.extend(results);
        }

        sections.join("\n\n")
    }

    /// Parse and execute a call.
    pub async fn call(arguments: JsonObject, client: &MemuClient) -> Result<CallToolResult, ToolError> {
        let params: MemuRetrieveParams = parse_params(arguments)?;
        Ok(Self::execute(&params, client).await)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<MemuRetrieveParams>().into(),
            annotations: Some(annotations(true, false, true)),
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Search memories".into()),
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

/// Renders the categories section; nameless categories are skipped.
fn format_categories(categories: &[MemoryCategory]) -> Option<String> {
    let mut lines = Vec::new();
    for category in categories {
        let Some(name) = non_empty(&category.name) else {
            continue;
        };
        lines.push(format!("### {}", name));
        if let Some(description) = non_empty(&category.description) {
            lines.push(description.to_string());
        }
        if let Some(summary) = non_empty(&category.summary) {
            lines.push(format!("Summary: {}", summary));
        }
    }
    section("## Categories", lines)
}

/// Renders the memories section; items without any text are skipped.
fn format_items(items: &[MemoryItem]) -> Option<String> {
    let lines = items
        .iter()
        .filter(|item| !item.text().trim().is_empty())
        .map(|item| match non_empty(&item.memory_type) {
            Some(memory_type) => format!("- [{}] {}", memory_type, item.text()),
            None => format!("- {}", item.text()),
        })
        .collect();
    section("## Memories", lines)
}

/// Renders the resources section; resources without a URL are skipped.
fn format_resources(resources: &[Resource]) -> Option<String> {
    let lines = resources
        .iter()
        .filter_map(|resource| {
            let url = non_empty(&resource.resource_url)?;
            let label = non_empty(&resource.caption)
                .or(non_empty(&resource.modality))
                .unwrap_or("resource");
            Some(format!("- [{}]({})", label, url))
        })
        .collect();
    section("## Resources", lines)
}

fn section(heading: &str, lines: Vec<String>) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    Some(format!("{}\n{}", heading, lines.join("\n")))
}
