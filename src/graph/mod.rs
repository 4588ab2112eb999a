//! Graph abstraction layer for SPARQL endpoint access.
//!
//! This module provides a trait-based abstraction over SPARQL endpoints,
//! so analysis code runs unchanged against a live service or an in-memory
//! test double.
//!
//! # Architecture
//!
//! - [`SparqlExecutor`] - Execute SELECT queries (required for all backends)
//! - [`Query`] / [`QueryExt`] - Fluent query building and execution
//! - [`Template`] - `$placeholder` substitution with typed SPARQL terms
//! - [`Row`] / [`Binding`] - Decoded result rows
//! - [`Vocabulary`] - IRI prefixes and property ids of the target graph
//!
//! # Usage
//!
//! ```ignore
//! use taxolint::graph::{QueryExt, Template, Vocabulary};
//! use taxolint::models::Relation;
//!
//! // Simple query
//! let rows = client.query("SELECT ?o WHERE { wd:Q5 wdt:P279 ?o }")
//!     .fetch_all()
//!     .await?;
//!
//! // Query with typed parameters
//! let template = Template::new("SELECT ?o WHERE { $s $p ?o }")
//!     .bind("s", &entity_id)
//!     .bind("p", vocab.predicate(Relation::SubclassOf));
//! let rows = client.query(template).fetch_all().await?;
//! ```

mod query;
mod row;
mod template;
mod traits;
mod vocabulary;

pub mod backends;

// Re-export core types
pub use query::{Query, QueryExt};
pub use row::{Binding, ResultsBody, ResultsHead, Row, RowStream, SparqlResults};
pub use template::{Literal, Predicate, Template, ToSparql};
pub use traits::SparqlExecutor;
pub use vocabulary::Vocabulary;
