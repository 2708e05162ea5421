//! memU tools module.
//!
//! One file per tool:
//! - `memorize`: submit a conversation for asynchronous memorization
//! - `memorize_status`: poll a memorization task
//! - `retrieve`: semantic search over memories
//! - `categories`: list memory categories
//! - `delete`: delete memories (destructive)

pub mod categories;
pub mod common;
pub mod delete;
pub mod memorize;
pub mod memorize_status;
pub mod retrieve;

pub use categories::{MemuCategoriesParams, MemuCategoriesTool};
pub use delete::{MemuDeleteParams, MemuDeleteTool};
pub use memorize::{MemuMemorizeParams, MemuMemorizeTool};
pub use memorize_status::{MemuMemorizeStatusParams, MemuMemorizeStatusTool};
pub use retrieve::{MemuRetrieveParams, MemuRetrieveTool};
