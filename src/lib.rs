//! bookshelf-mcp — personal book catalog served over MCP (stdio).
//!
//! Layers: `domain` (BookRecord / Library aggregate) → `application` (LibraryService,
//! card view) → `infra` (key-value stores, persistence adapter) → `interface` (MCP tools).

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod interface;
pub mod logging;
