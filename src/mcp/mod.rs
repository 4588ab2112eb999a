//! Model Context Protocol (MCP) server implementation for taxolint.
//!
//! Exposes the AP1 check to AI assistants over stdio.
//!
//! ## Architecture
//!
//! The server uses compile-time dependency injection via the `Context` struct.
//! Services and repositories are resolved at tool execution time using `FromRef`.
//!
//! ## Modules
//!
//! - `server`: MCP server implementation with tool router
//! - `protocol`: Response formatting (JSON or TOON)
//! - `tools`: Tool implementations

pub mod protocol;
pub(crate) mod server;
pub mod tools;

pub use server::McpServer;
