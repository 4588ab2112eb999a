//! Placeholder substitution for SPARQL query templates.
//!
//! Templates reference parameters as `$name`. A placeholder name is the
//! longest run of `[A-Za-z0-9_]` after the `$`, so `$item10` is never
//! mistaken for `$item1` followed by `0`. Substituted text is not scanned
//! again. SPARQL variables inside templates must use the `?var` form.

use std::collections::HashMap;

use crate::error::AppError;
use crate::models::EntityId;

/// Rendered SPARQL terms keyed by placeholder name.
type Params = HashMap<String, String>;

/// A value that can be spliced into a query as a SPARQL term.
pub trait ToSparql {
    fn to_sparql(&self) -> String;
}

impl<T: ToSparql + ?Sized> ToSparql for &T {
    fn to_sparql(&self) -> String {
        (**self).to_sparql()
    }
}

/// Entities render as `wd:` prefixed names.
impl ToSparql for EntityId {
    fn to_sparql(&self) -> String {
        format!("wd:{}", self)
    }
}

/// A property used as a predicate, optionally as a one-or-more path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    property: EntityId,
    transitive: bool,
}

impl Predicate {
    pub fn direct(property: EntityId) -> Self {
        Self {
            property,
            transitive: false,
        }
    }

    pub fn transitive(property: EntityId) -> Self {
        Self {
            property,
            transitive: true,
        }
    }
}

impl ToSparql for Predicate {
    fn to_sparql(&self) -> String {
        if self.transitive {
            format!("wdt:{}+", self.property)
        } else {
            format!("wdt:{}", self.property)
        }
    }
}

/// A plain string literal.
#[derive(Debug, Clone, Copy)]
pub struct Literal<'a>(pub &'a str);

impl ToSparql for Literal<'_> {
    fn to_sparql(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 2);
        out.push('"');
        for c in self.0.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                _ => out.push(c),
            }
        }
        out.push('"');
        out
    }
}

/// A query template with bound parameters.
///
/// # Example
///
/// ```ignore
/// let sparql = Template::new("SELECT ?o WHERE { $s $p ?o }")
///     .bind("s", &focal)
///     .bind("p", vocab.predicate(Relation::SubclassOf))
///     .render()?;
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
    params: Params,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Params::new(),
        }
    }

    /// Binds a placeholder. Rebinding a name replaces the previous value.
    pub fn bind(mut self, name: impl Into<String>, value: impl ToSparql) -> Self {
        self.params.insert(name.into(), value.to_sparql());
        self
    }

    /// Substitutes every placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Template`] for a placeholder without a binding.
    pub fn render(&self) -> Result<String, AppError> {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());

            if len == 0 {
                out.push('$');
            } else {
                let name = &after[..len];
                let value = self.params.get(name).ok_or_else(|| {
                    AppError::Template(format!("no value bound for placeholder ${}", name))
                })?;
                out.push_str(value);
            }
            rest = &after[len..];
        }
        out.push_str(rest);

        Ok(out)
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Template::new(text)
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Template::new(text)
    }
}
