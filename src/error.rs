//! Application error types with MCP protocol conversion.

use std::time::Duration;

use rmcp::model::ErrorCode;
use thiserror::Error;

/// Application-level errors for taxolint.
#[derive(Error, Debug)]
pub enum AppError {
    // Graph service errors
    #[error("SPARQL query failed: {message}")]
    GraphQuery { message: String, query: String },

    #[error("Failed to decode SPARQL result: {0}")]
    Decode(String),

    #[error("Query template error: {0}")]
    Template(String),

    // Domain errors
    #[error("Invalid entity identifier: {0:?}")]
    InvalidEntityId(String),

    #[error("Invalid hypothetical statement: {0}")]
    InvalidHypothesis(String),

    #[error("Analysis did not complete within {0:?}")]
    Timeout(Duration),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Builds a [`AppError::GraphQuery`] for the given query text.
    pub fn graph_query(message: impl Into<String>, query: &str) -> Self {
        AppError::GraphQuery {
            message: message.into(),
            query: query.to_string(),
        }
    }
}

impl From<AppError> for rmcp::model::ErrorData {
    fn from(err: AppError) -> Self {
        let (code, app_code) = match &err {
            AppError::InvalidEntityId(_) => (ErrorCode::INVALID_PARAMS, "INVALID_ENTITY_ID"),
            AppError::InvalidHypothesis(_) => (ErrorCode::INVALID_PARAMS, "INVALID_HYPOTHESIS"),
            AppError::GraphQuery { .. } => (ErrorCode::INTERNAL_ERROR, "GRAPH_QUERY_ERROR"),
            AppError::Decode(_) => (ErrorCode::INTERNAL_ERROR, "DECODE_ERROR"),
            AppError::Template(_) => (ErrorCode::INTERNAL_ERROR, "TEMPLATE_ERROR"),
            AppError::Timeout(_) => (ErrorCode::INTERNAL_ERROR, "TIMEOUT"),
            AppError::Config(_) => (ErrorCode::INTERNAL_ERROR, "CONFIG_ERROR"),
        };

        rmcp::model::ErrorData::new(code, format!("[{}] {}", app_code, err), None)
    }
}
