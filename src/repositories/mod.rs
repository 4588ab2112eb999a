//! Data access layer for SPARQL queries.
//!
//! Repositories compose queries through [`queries`] and decode the rows,
//! using the `FromContext` derive macro for dependency injection.

pub mod queries;

mod label;
mod probe;
mod taxonomy;

pub use label::{decode_label_row, LabelRepository};
pub use probe::{decode_probe_row, ProbeRepository};
pub use taxonomy::TaxonomyRepository;
