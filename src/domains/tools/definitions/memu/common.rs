//! Common utilities shared across memU tools.
//!
//! Argument parsing, result construction and small formatting helpers.

use rmcp::model::{CallToolResult, Content, JsonObject, ToolAnnotations};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::domains::memu::MemuError;
use crate::domains::memu::types::TaskStatus;
use crate::domains::tools::ToolError;

/// Deserialize tool arguments into a params struct.
pub fn parse_params<T: DeserializeOwned>(arguments: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Report a failed API call as a failed tool result.
pub fn api_error_result(tool: &str, err: &MemuError) -> CallToolResult {
    error_result(&format!("{tool} failed. {err}"))
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Create a success result with a text summary and the raw API payload.
///
/// The payload is attached as structured content only when it is a JSON
/// object; other values are carried by the text alone.
pub fn structured_result(summary: String, payload: Value) -> CallToolResult {
    if !payload.is_object() {
        return success_result(summary);
    }

    CallToolResult {
        content: vec![Content::text(summary)],
        structured_content: Some(payload),
        is_error: Some(false),
        meta: None,
    }
}

/// Pretty-print a JSON value, leaving plain strings unquoted.
pub fn raw_dump(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Return the value when present and not blank.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Render a remote task status with its display label, e.g. `SUCCESS (completed)`.
///
/// Statuses outside the known set are shown verbatim.
pub fn format_status(status: &str) -> String {
    match TaskStatus::parse(status) {
        Some(known) => format!("{} ({})", status, known.label()),
        None => status.to_string(),
    }
}

/// Behaviour hints advertised with a tool.
///
/// Every memU tool talks to an external service, so `open_world` is always set.
pub fn annotations(read_only: bool, destructive: bool, idempotent: bool) -> ToolAnnotations {
    ToolAnnotations {
        title: None,
        read_only_hint: Some(read_only),
        destructive_hint: Some(destructive),
        idempotent_hint: Some(idempotent),
        open_world_hint: Some(true),
    }
}

#[cfg(test)]
pub(crate) fn text_of(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}
