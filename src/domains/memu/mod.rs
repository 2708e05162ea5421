//! memU remote API domain.
//!
//! This module is the adapter between tool calls and the memU REST API:
//!
//! - `credentials` - per-call resolution of `MEMU_API_KEY` / `MEMU_USER_ID`
//! - `types` - request and response shapes exchanged with the API
//! - `client` - the HTTP client that sends one request per tool invocation
//! - `error` - the error taxonomy for configuration and remote failures
//!
//! Nothing here keeps state between calls. The remote service owns all
//! memories and task state; this layer only forwards and reads.

mod client;
mod credentials;
mod error;
pub mod types;

pub use client::{MemuClient, paths};
pub use credentials::{API_KEY_VAR, CredentialSource, Credentials, USER_ID_VAR};
pub use error::{MemuError, MemuResult};
pub use types::{ConversationMessage, RetrieveQuery, Role};
