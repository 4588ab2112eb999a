//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::error::AppError;
use crate::graph::backends::http::HttpSparqlClient;
use crate::graph::SparqlExecutor;

/// Shared handle to the graph service, backend-agnostic.
pub type AppGraph = Arc<dyn SparqlExecutor>;

/// Root application context for dependency injection.
///
/// The Context holds all shared dependencies and uses `#[derive(Context)]`
/// to generate `FromRef` implementations for each field, enabling
/// compile-time dependency resolution.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// SPARQL endpoint client.
    pub graph: AppGraph,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a new context with the given dependencies.
    pub fn new(graph: AppGraph, config: Config) -> Self {
        Self {
            graph,
            config: Arc::new(config),
        }
    }

    /// Creates a context backed by the configured HTTP endpoint.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        tracing::info!(endpoint = %config.sparql.endpoint, "Using SPARQL endpoint");
        let client = HttpSparqlClient::new(&config.sparql, &config.vocabulary)?;
        Ok(Self::new(Arc::new(client), config))
    }
}
