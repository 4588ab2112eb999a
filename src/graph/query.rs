//! Query builder for fluent SPARQL query construction.

use futures::TryStreamExt;

use crate::error::AppError;
use crate::graph::row::{Row, RowStream};
use crate::graph::template::Template;
use crate::graph::traits::SparqlExecutor;

/// A builder for binding and executing SPARQL queries.
///
/// `Query` renders a [`Template`] and executes it against any
/// [`SparqlExecutor`].
///
/// # Example
///
/// ```ignore
/// let template = Template::new("SELECT ?o WHERE { $s wdt:P279+ ?o }").bind("s", &entity_id);
/// let rows = Query::new(&client, template).fetch_all().await?;
/// ```
pub struct Query<'a, E: SparqlExecutor + ?Sized> {
    executor: &'a E,
    template: Template,
}

impl<'a, E: SparqlExecutor + ?Sized> Query<'a, E> {
    /// Creates a new query builder.
    ///
    /// # Arguments
    ///
    /// * `executor` - The executor to run the query against
    /// * `template` - The query text, possibly with `$placeholders`
    pub fn new(executor: &'a E, template: impl Into<Template>) -> Self {
        Self {
            executor,
            template: template.into(),
        }
    }

    /// Executes the query and returns a stream of rows.
    pub async fn execute(self) -> Result<RowStream<'a>, AppError> {
        let sparql = self.template.render()?;
        self.executor.execute_sparql(&sparql).await
    }

    /// Executes the query and collects all rows into a vector.
    pub async fn fetch_all(self) -> Result<Vec<Row>, AppError> {
        self.execute().await?.try_collect().await
    }
}

/// Extension trait providing a convenient `query()` method.
///
/// This trait is automatically implemented for all [`SparqlExecutor`]
/// types, allowing you to write `executor.query("...")` instead of
/// `Query::new(&executor, "...")`.
pub trait QueryExt: SparqlExecutor {
    /// Creates a new query builder for this executor.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use taxolint::graph::QueryExt;
    ///
    /// let template = Template::new("SELECT ?o WHERE { $s wdt:P31 ?o }").bind("s", &entity_id);
    /// let rows = client.query(template).fetch_all().await?;
    /// ```
    fn query(&self, template: impl Into<Template>) -> Query<'_, Self>
    where
        Self: Sized,
    {
        Query::new(self, template)
    }
}

// Blanket implementation for all SparqlExecutor types
impl<E: SparqlExecutor> QueryExt for E {}
