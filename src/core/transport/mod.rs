//! Transport layer for the MCP server.
//!
//! The host assistant launches the server as a child process and talks
//! JSON-RPC over stdin/stdout, so STDIO is the only transport.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
