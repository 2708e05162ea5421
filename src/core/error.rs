//! Error types and handling for the MCP server.
//!
//! This module defines the error type for building the server: an invalid
//! configuration or a memU client that cannot be constructed. Errors raised
//! inside a single tool call are reported as a failed tool result instead and
//! never reach this type; transport failures carry their own `TransportError`.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error raised while setting up the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the memU API adapter.
    #[error("memU error: {0}")]
    Memu(#[from] crate::domains::memu::MemuError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
