//! Credential resolution for memU API calls.
//!
//! Credentials are read at the start of every tool invocation rather than
//! once at startup, so a missing variable fails each call on its own.

use super::error::{MemuError, MemuResult};

/// Environment variable holding the memU API key.
pub const API_KEY_VAR: &str = "MEMU_API_KEY";

/// Environment variable holding the user identifier all calls are scoped to.
pub const USER_ID_VAR: &str = "MEMU_USER_ID";

/// Resolved credentials for a single API call.
#[derive(Clone)]
pub struct Credentials {
    /// Bearer token sent in the `Authorization` header.
    pub api_key: String,

    /// User every request is scoped to.
    pub user_id: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> MemuResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup.
    ///
    /// Unset and empty values are both treated as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MemuResult<Self> {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| {
                    MemuError::configuration(format!("{name} environment variable is not set"))
                })
        };

        Ok(Self {
            api_key: require(API_KEY_VAR)?,
            user_id: require(USER_ID_VAR)?,
        })
    }
}

/// Where a client obtains credentials on each call.
#[derive(Clone, Default)]
pub enum CredentialSource {
    /// Re-read `MEMU_API_KEY` and `MEMU_USER_ID` from the environment.
    #[default]
    Environment,

    /// A fixed pair of values. Missing values behave like unset variables.
    Fixed {
        api_key: Option<String>,
        user_id: Option<String>,
    },
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environment => f.write_str("Environment"),
            Self::Fixed { user_id, .. } => f
                .debug_struct("Fixed")
                .field("api_key", &"[REDACTED]")
                .field("user_id", user_id)
                .finish(),
        }
    }
}

impl CredentialSource {
    /// Fixed credentials with both values present.
    pub fn fixed(api_key: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::Fixed {
            api_key: Some(api_key.into()),
            user_id: Some(user_id.into()),
        }
    }

    /// Resolve credentials for one call.
    pub fn resolve(&self) -> MemuResult<Credentials> {
        match self {
            Self::Environment => Credentials::from_env(),
            Self::Fixed { api_key, user_id } => Credentials::from_lookup(|name| match name {
                API_KEY_VAR => api_key.clone(),
                USER_ID_VAR => user_id.clone(),
                _ => None,
            }),
        }
    }
}
