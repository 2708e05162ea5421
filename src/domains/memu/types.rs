//! Request and response shapes for the memU API.
//!
//! Response types are lenient: every response field is an `Option`, and list
//! fields accept both `null` and absence. Entries missing the field they are
//! displayed by (a category name, a resource URL, an item text) are skipped
//! when rendering. Callers fall back to a raw JSON dump only when a payload
//! does not fit at all.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Conversation Input
// ============================================================================

/// Speaker of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message of a dialogue, in dialogue order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConversationMessage {
    /// Who sent the message.
    pub role: Role,

    /// Message text.
    pub content: String,

    /// Optional speaker name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional ISO 8601 timestamp of the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ConversationMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
            created_at: None,
        }
    }
}

/// Search input: either plain text or conversation context.
///
/// When a conversation is sent, the API rewrites it into a distilled query
/// before searching.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RetrieveQuery {
    /// Plain text search query.
    Text(String),

    /// Conversation context to rewrite into a query.
    Conversation(Vec<ConversationMessage>),
}

// ============================================================================
// Request Bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct MemorizeRequest<'a> {
    pub conversation: &'a [ConversationMessage],
    pub user_id: &'a str,
    pub agent_id: &'a str,
    pub agent_name: &'a str,
    pub session_date: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RetrieveRequest<'a> {
    pub user_id: &'a str,
    pub agent_id: &'a str,
    pub query: &'a RetrieveQuery,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScopeRequest<'a> {
    pub user_id: &'a str,
    pub agent_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteRequest<'a> {
    pub user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<&'a str>,
}

// ============================================================================
// Responses
// ============================================================================

/// Response of the memorize endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemorizeResponse {
    pub task_id: Option<String>,
    pub status: Option<String>,
}

/// Response of the memorize status endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskStatusResponse {
    pub task_id: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub completed_at: Option<String>,
}

/// A remote-computed grouping of memories.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
}

/// A single stored memory.
///
/// Older endpoint versions return the text as `summary`, newer ones as `content`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryItem {
    pub memory_type: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
}

impl MemoryItem {
    /// The memory text, whichever field carried it.
    pub fn text(&self) -> &str {
        self.content
            .as_deref()
            .or(self.summary.as_deref())
            .unwrap_or_default()
    }
}

/// An attachment-like object returned by retrieval.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    #[serde(alias = "url")]
    pub resource_url: Option<String>,
    pub caption: Option<String>,
    pub modality: Option<String>,
    pub content: Option<String>,
}

/// Response of the retrieve endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveResponse {
    pub rewritten_query: Option<String>,
    pub categories: Option<Vec<MemoryCategory>>,
    pub items: Option<Vec<MemoryItem>>,
    pub resources: Option<Vec<Resource>>,
}

/// Response of the categories endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Option<Vec<MemoryCategory>>,
}

// ============================================================================
// Task Status
// ============================================================================

/// Known states of a remote memorize task.
///
/// Display-only: the remote service owns the state machine and may report
/// values outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Processing,
    Success,
    Failed,
}

impl TaskStatus {
    /// Look up a remote status string.
    pub fn parse(status: &str) -> Option<Self> {
        match status.to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "PROCESSING" => Some(Self::Processing),
            "SUCCESS" => Some(Self::Success),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "queued",
            Self::Processing => "in progress",
            Self::Success => "completed",
            Self::Failed => "failed",
        }
    }
}
