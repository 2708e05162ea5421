//! HTTP client for the memU API.
//!
//! Every operation resolves credentials first, then sends exactly one request.
//! There are no retries and no timeout beyond reqwest's defaults; failures go
//! straight back to the calling tool.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::credentials::{CredentialSource, Credentials};
use super::error::{MemuError, MemuResult};
use super::types::{
    ConversationMessage, DeleteRequest, MemorizeRequest, RetrieveQuery, RetrieveRequest,
    ScopeRequest,
};
use crate::core::config::MemuConfig;

/// API paths, as URL path segments relative to the base URL.
pub mod paths {
    pub const MEMORIZE: &[&str] = &["api", "v3", "memory", "memorize"];
    pub const MEMORIZE_STATUS: &[&str] = &["api", "v3", "memory", "memorize", "status"];
    pub const RETRIEVE: &[&str] = &["api", "v3", "memory", "retrieve"];
    pub const CATEGORIES: &[&str] = &["api", "v3", "memory", "categories"];
    pub const DELETE: &[&str] = &["api", "v3", "memory", "delete"];
}

/// Client for the memU memory API.
///
/// Base URL and agent identity are fixed at construction; credentials are
/// resolved again on every call.
#[derive(Debug, Clone)]
pub struct MemuClient {
    http: reqwest::Client,
    base_url: Url,
    agent_id: String,
    agent_name: String,
    credentials: CredentialSource,
}

impl MemuClient {
    /// Create a client that reads credentials from the environment.
    pub fn new(config: &MemuConfig) -> MemuResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(MemuError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(format!("memu-mcp-server/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            agent_id: config.agent_id.clone(),
            agent_name: config.agent_name.clone(),
            credentials: CredentialSource::default(),
        })
    }

    /// Replace the credential source.
    pub fn with_credentials(mut self, credentials: CredentialSource) -> Self {
        self.credentials = credentials;
        self
    }

    /// The agent identifier sent with scoped requests.
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Resolve credentials for one call.
    pub fn credentials(&self) -> MemuResult<Credentials> {
        self.credentials.resolve()
    }

    /// Build an absolute endpoint URL. Each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> MemuResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MemuError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Enqueue a conversation for asynchronous memorization.
    ///
    /// `session_date` defaults to the current UTC time.
    #[instrument(skip_all, fields(messages = conversation.len()))]
    pub async fn memorize(
        &self,
        conversation: &[ConversationMessage],
        session_date: Option<&str>,
    ) -> MemuResult<Value> {
        let credentials = self.credentials()?;
        let now = chrono::Utc::now().to_rfc3339();
        let body = MemorizeRequest {
            conversation,
            user_id: &credentials.user_id,
            agent_id: &self.agent_id,
            agent_name: &self.agent_name,
            session_date: session_date.unwrap_or(&now),
        };
        self.send(&credentials, Method::POST, paths::MEMORIZE, Some(&body))
            .await
    }

    /// Read the state of a memorize task.
    #[instrument(skip(self))]
    pub async fn memorize_status(&self, task_id: &str) -> MemuResult<Value> {
        let credentials = self.credentials()?;
        let segments: Vec<&str> = paths::MEMORIZE_STATUS
            .iter()
            .copied()
            .chain(std::iter::once(task_id))
            .collect();
        self.send(&credentials, Method::GET, &segments, None::<&()>)
            .await
    }

    /// Semantic search over the user's memories.
    #[instrument(skip_all)]
    pub async fn retrieve(&self, query: &RetrieveQuery) -> MemuResult<Value> {
        let credentials = self.credentials()?;
        let body = RetrieveRequest {
            user_id: &credentials.user_id,
            agent_id: &self.agent_id,
            query,
        };
        self.send(&credentials, Method::POST, paths::RETRIEVE, Some(&body))
            .await
    }

    /// List memory categories for this user and agent.
    #[instrument(skip_all)]
    pub async fn categories(&self) -> MemuResult<Value> {
        let credentials = self.credentials()?;
        let body = ScopeRequest {
            user_id: &credentials.user_id,
            agent_id: &self.agent_id,
        };
        self.send(&credentials, Method::POST, paths::CATEGORIES, Some(&body))
            .await
    }

    /// Delete memories. Without `agent_id` the request covers every agent.
    #[instrument(skip(self))]
    pub async fn delete(&self, agent_id: Option<&str>) -> MemuResult<Value> {
        let credentials = self.credentials()?;
        let body = DeleteRequest {
            user_id: &credentials.user_id,
            agent_id,
        };
        self.send(&credentials, Method::POST, paths::DELETE, Some(&body))
            .await
    }

    // ========================================================================
    // Internal HTTP methods
    // ========================================================================

    /// Send a single request with already resolved credentials.
    async fn send<B>(
        &self,
        credentials: &Credentials,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> MemuResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url.path());

        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&credentials.api_key);
        if method != Method::GET {
            if let Some(body) = body {
                request = request.json(body);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("memU API returned {}", status);
            return Err(MemuError::from_status(status.as_u16(), text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| MemuError::InvalidResponse(format!("JSON parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::memu::testing::{TEST_AGENT, TEST_KEY, TEST_USER, mock_client};
    use crate::domains::memu::types::Role;
    use serde_json::json;
    use wiremock::matchers::{any, body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn conversation() -> Vec<ConversationMessage> {
        vec![
            ConversationMessage::new(Role::User, "I switched to vim"),
            ConversationMessage::new(Role::Assistant, "Noted"),
            ConversationMessage::new(Role::User, "Thanks"),
        ]
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = mock_client("https://api.memu.so");
        let url = client.endpoint(&["api", "v3", "x y/z"]).unwrap();
        assert_eq!(url.as_str(), "https://api.memu.so/api/v3/x%20y%2Fz");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = mock_client("http://localhost:9000/proxy/");
        let url = client.endpoint(paths::RETRIEVE).unwrap();
        assert_eq!(url.path(), "/proxy/api/v3/memory/retrieve");
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let config = MemuConfig {
            base_url: "not a url".into(),
            ..MemuConfig::default()
        };
        assert!(matches!(
            MemuClient::new(&config),
            Err(MemuError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_memorize_posts_scoped_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v3/memory/memorize"))
            .and(header("authorization", format!("Bearer {TEST_KEY}").as_str()))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({
                "user_id": TEST_USER,
                "agent_id": TEST_AGENT,
                "session_date": "2024-01-01T00:00:00Z",
                "conversation": [
                    {"role": "user", "content": "I switched to vim"},
                    {"role": "assistant", "content": "Noted"},
                    {"role": "user", "content": "Thanks"}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"task_id": "t1", "status": "PENDING"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let value = client
            .memorize(&conversation(), Some("2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        assert_eq!(value["task_id"], "t1");
    }

    #[tokio::test]
    async fn test_memorize_defaults_session_date() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v3/memory/memorize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        client.memorize(&conversation(), None).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let date = body["session_date"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok());
    }

    #[tokio::test]
    async fn test_status_is_get_with_encoded_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/memory/memorize/status/a%2Fb"))
            .and(header("authorization", format!("Bearer {TEST_KEY}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "SUCCESS"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let value = client.memorize_status("a/b").await.unwrap();
        assert_eq!(value["status"], "SUCCESS");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
        assert!(requests[0].headers.get("content-type").is_none());
    }

    #[tokio::test]
    async fn test_delete_body_without_agent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v3/memory/delete"))
            .and(body_json(json!({"user_id": TEST_USER})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 3})))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        client.delete(None).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_body_with_agent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v3/memory/delete"))
            .and(body_json(json!({"user_id": TEST_USER, "agent_id": "other"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        client.delete(Some("other")).await.unwrap();
    }

    #[tokio::test]
    async fn test_status_codes_map_to_error_kinds() {
        let cases: [(u16, fn(&MemuError) -> bool); 4] = [
            (401, |e: &MemuError| matches!(e, MemuError::Authentication)),
            (422, |e: &MemuError| matches!(e, MemuError::Validation(d) if d == "detail")),
            (429, |e: &MemuError| matches!(e, MemuError::RateLimited)),
            (500, |e: &MemuError| matches!(e, MemuError::Api { status: 500, body } if body == "detail")),
        ];

        for (status, check) in cases {
            let server = MockServer::start().await;
            Mock::given(any())
                .respond_with(ResponseTemplate::new(status).set_body_string("detail"))
                .mount(&server)
                .await;

            let client = mock_client(&server.uri());
            let err = client.categories().await.unwrap_err();
            assert!(check(&err), "status {status} gave {err:?}");
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri()).with_credentials(CredentialSource::Fixed {
            api_key: Some(TEST_KEY.into()),
            user_id: None,
        });

        assert!(client.categories().await.unwrap_err().is_configuration());
        assert!(client.memorize_status("t1").await.unwrap_err().is_configuration());
        assert!(client.delete(None).await.unwrap_err().is_configuration());
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let value = client.delete(None).await.unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let err = client.categories().await.unwrap_err();
        assert!(matches!(err, MemuError::InvalidResponse(_)));
    }
}
