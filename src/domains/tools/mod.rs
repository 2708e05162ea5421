//! Tools domain module.
//!
//! Tools are the operations MCP clients can call. Each memU tool translates
//! a call into one memU API request and formats the answer as text.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder used by the server handler
//! - `registry.rs` - Tool metadata and name-based dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/memu/`
//! 2. Define params, `execute()`, `call()`, `to_tool()` and `create_route()`
//! 3. Export in `definitions/memu/mod.rs` and `definitions/mod.rs`
//! 4. Add the route in `router.rs` and the dispatch arm in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
