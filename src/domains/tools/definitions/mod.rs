//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod memu;

pub use memu::{
    MemuCategoriesParams, MemuCategoriesTool, MemuDeleteParams, MemuDeleteTool,
    MemuMemorizeParams, MemuMemorizeStatusParams, MemuMemorizeStatusTool, MemuMemorizeTool,
    MemuRetrieveParams, MemuRetrieveTool,
};
