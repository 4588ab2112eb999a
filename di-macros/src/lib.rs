//! Derive macros for taxolint's compile-time dependency injection.
//!
//! - `#[derive(Context)]` makes every field of a root context extractable
//! - `#[derive(FromContext)]` builds a component by extracting each field
//!
//! Generated code refers to `crate::FromRef`, so the consuming crate must
//! expose the trait at its root.

use proc_macro::TokenStream;
use syn::{punctuated::Punctuated, token::Comma, Data, DeriveInput, Field, Fields};

mod context;
mod from_context;

/// Derive macro for the root DI context.
///
/// Emits `impl FromRef<Ctx> for FieldType` for every field, cloning the
/// field out of the context. Field types must therefore be distinct and
/// implement `Clone`.
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Context {
///     pub graph: AppGraph,
///     pub config: Arc<Config>,
/// }
/// ```
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::derive_context_impl(input)
}

/// Derive macro for components resolved from a context.
///
/// Each field is initialized with `FromRef::from_ref(ctx)`. Fields may be
/// context members or other `FromContext` components.
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// pub struct AntipatternService {
///     taxonomy: TaxonomyRepository,
///     probes: ProbeRepository,
///     config: Arc<Config>,
/// }
/// ```
///
/// The context type defaults to `Context`; override it with
/// `#[from_context(Context = "path::To::Ctx")]`.
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::derive_from_context_impl(input)
}

/// Named fields of a struct, or a spanned error naming the derive.
pub(crate) fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> Result<&'a Punctuated<Field, Comma>, syn::Error> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{} requires a struct with named fields", derive),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{} can only be derived for structs", derive),
        )),
    }
}
