//! Business logic services.
//!
//! Services orchestrate repositories and handle business rules,
//! using the `FromContext` derive macro for dependency injection.

mod antipattern;

pub use antipattern::AntipatternService;
