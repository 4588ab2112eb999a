//! Dependency injection infrastructure.
//!
//! Services and repositories declare their dependencies as fields and derive
//! `FromContext`; the root [`Context`](crate::context::Context) derives
//! `Context` so each of its fields can be extracted by type.
//!
//! ```ignore
//! use taxolint::FromRef;
//!
//! let ctx = Context::from_config(config)?;
//! let service = AntipatternService::from_ref(&ctx);
//! let report = service.analyze(&focal, None).await?;
//! ```

/// Trait for extracting a value from a reference to another type.
///
/// Types that implement `FromRef<T>` can be built from `&T`.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// Any Clone type can be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}

// Re-export derive macros
pub use di_macros::{Context, FromContext};
