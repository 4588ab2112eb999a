//! SPARQL 1.1 Protocol backend over HTTP.
//!
//! Talks to any endpoint that answers with the SPARQL JSON results format,
//! Wikidata Query Service by default.
//!
//! # Example
//!
//! ```ignore
//! use taxolint::graph::backends::http::HttpSparqlClient;
//! use taxolint::graph::QueryExt;
//!
//! let client = HttpSparqlClient::new(&config.sparql, &config.vocabulary)?;
//! let rows = client.query("SELECT ?o WHERE { wd:Q5 wdt:P279 ?o }")
//!     .fetch_all()
//!     .await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::config::SparqlConfig;
use crate::error::AppError;
use crate::graph::row::{RowStream, SparqlResults};
use crate::graph::traits::SparqlExecutor;
use crate::graph::vocabulary::Vocabulary;

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Longest slice of an error body kept in error messages.
const ERROR_BODY_LIMIT: usize = 512;

/// HTTP client for a SPARQL endpoint.
///
/// Prepends the vocabulary's PREFIX prologue to every query. Short queries
/// go out as GET requests; queries longer than `post_threshold` bytes are
/// sent as form-encoded POST bodies to stay clear of URL length limits.
///
/// This type is cheap to clone - `reqwest::Client` is `Arc`-based.
#[derive(Clone)]
pub struct HttpSparqlClient {
    client: Client,
    endpoint: Arc<str>,
    prologue: Arc<str>,
    post_threshold: usize,
}

impl HttpSparqlClient {
    /// Creates a client for the configured endpoint.
    pub fn new(config: &SparqlConfig, vocabulary: &Vocabulary) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::graph_query(format!("Failed to build HTTP client: {}", e), "")
            })?;

        Ok(Self {
            client,
            endpoint: Arc::from(config.endpoint.as_str()),
            prologue: Arc::from(vocabulary.prologue()),
            post_threshold: config.post_threshold,
        })
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches and decodes the results of a fully prefixed query.
    async fn fetch(&self, query: &str) -> Result<SparqlResults, AppError> {
        let request = if query.len() > self.post_threshold {
            tracing::debug!(bytes = query.len(), "POST SPARQL query");
            self.client
                .post(self.endpoint.as_ref())
                .form(&[("query", query)])
        } else {
            tracing::debug!(bytes = query.len(), "GET SPARQL query");
            self.client
                .get(self.endpoint.as_ref())
                .query(&[("query", query)])
        };

        let response = request
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .send()
            .await
            .map_err(|e| AppError::graph_query(format!("request failed: {}", e), query))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            tracing::warn!(%status, "SPARQL endpoint returned an error");
            return Err(AppError::graph_query(
                format!("endpoint returned {}: {}", status, excerpt.trim()),
                query,
            ));
        }

        response
            .json::<SparqlResults>()
            .await
            .map_err(|e| AppError::graph_query(format!("malformed results envelope: {}", e), query))
    }
}

#[async_trait]
impl SparqlExecutor for HttpSparqlClient {
    async fn execute_sparql(&self, sparql: &str) -> Result<RowStream<'_>, AppError> {
        let query = format!("{}{}", self.prologue, sparql);
        let results = self.fetch(&query).await?;
        let rows = results.into_rows();
        tracing::debug!(rows = rows.len(), "SPARQL query answered");

        Ok(Box::pin(futures::stream::iter(rows.into_iter().map(Ok))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_configured_endpoint_and_prologue() {
        let config = SparqlConfig::default();
        let vocabulary = Vocabulary::default();
        let client = HttpSparqlClient::new(&config, &vocabulary).unwrap();

        assert_eq!(client.endpoint(), "https://query.wikidata.org/sparql");
        assert!(client.prologue.starts_with("PREFIX wd:"));
        assert_eq!(client.post_threshold, config.post_threshold);
    }
}
