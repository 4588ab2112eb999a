//! taxolint - Taxonomy antipattern checks for Wikidata-style graphs
//!
//! Detects entities that are both an instance and a transitive subclass of
//! the same class, and predicts whether a proposed statement would create
//! such an overlap.

pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod graph;
pub mod mcp;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
