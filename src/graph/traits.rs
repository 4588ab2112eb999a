//! Core trait for SPARQL endpoint access.
//!
//! [`SparqlExecutor`] is the seam between analysis code and the graph
//! service: the HTTP backend implements it for real endpoints, tests
//! implement it with in-memory doubles.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::graph::row::RowStream;

/// Executes read-only SPARQL SELECT queries.
///
/// The knowledge graph is never written to, so there is no mutation or
/// transaction API.
#[async_trait]
pub trait SparqlExecutor: Send + Sync {
    /// Executes a SELECT query and returns a stream of result rows.
    ///
    /// An empty stream is a valid "no match" answer. Transport failures,
    /// non-success responses and malformed envelopes are reported as
    /// [`AppError::GraphQuery`].
    ///
    /// # Arguments
    ///
    /// * `sparql` - The fully rendered query text, without PREFIX prologue
    async fn execute_sparql(&self, sparql: &str) -> Result<RowStream<'_>, AppError>;
}

// Forward through shared pointers so `Arc<dyn SparqlExecutor>` can be queried directly
#[async_trait]
impl<T: SparqlExecutor + ?Sized> SparqlExecutor for Arc<T> {
    async fn execute_sparql(&self, sparql: &str) -> Result<RowStream<'_>, AppError> {
        (**self).execute_sparql(sparql).await
    }
}
