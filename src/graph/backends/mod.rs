//! Backend implementations for SPARQL endpoints.
//!
//! Each backend implements [`SparqlExecutor`](crate::graph::SparqlExecutor).
//!
//! # Available Backends
//!
//! | Backend | Module | Status |
//! |---------|--------|--------|
//! | SPARQL 1.1 Protocol over HTTP | [`http`] | Available |
//!
//! # Implementing a Backend
//!
//! 1. Create a client struct holding the connection state
//! 2. Implement `SparqlExecutor::execute_sparql`, returning rows as a stream
//! 3. Map transport and envelope failures to `AppError::GraphQuery`

pub mod http;
