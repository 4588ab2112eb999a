//! MCP tool implementations.

pub mod antipattern;
