//! Domain modules.
//!
//! - **memu**: the memU API adapter (credentials, types, HTTP client)
//! - **tools**: MCP tools built on top of the adapter

pub mod memu;
pub mod tools;
