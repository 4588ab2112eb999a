//! Taxonomy repository: closure and violation lookups.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::Config;
use crate::context::{AppGraph, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::{QueryExt, Row, Template};
use crate::models::EntityId;
use crate::repositories::queries;

/// Repository for SUBCLASS_OF closures and INSTANCE_OF/SUBCLASS_OF overlaps.
#[derive(FromContext, Clone)]
pub struct TaxonomyRepository {
    graph: AppGraph,
    config: Arc<Config>,
}

impl TaxonomyRepository {
    /// All transitive superclasses of `class`, first occurrence wins.
    pub async fn superclasses(&self, class: &EntityId) -> Result<Vec<EntityId>, AppError> {
        let vocab = &self.config.vocabulary;
        let ids = self.entities(queries::closure(vocab, class), "object").await?;
        tracing::debug!(class = %class, count = ids.len(), "Resolved superclass closure");
        Ok(ids)
    }

    /// Classes the entity is both an instance and a subclass of.
    pub async fn shared_ancestors(&self, focal: &EntityId) -> Result<Vec<EntityId>, AppError> {
        let vocab = &self.config.vocabulary;
        self.entities(queries::up_violations(vocab, focal), "object")
            .await
    }

    /// Subclasses of the entity that are also its instances.
    pub async fn dual_classified_descendants(
        &self,
        focal: &EntityId,
    ) -> Result<Vec<EntityId>, AppError> {
        let vocab = &self.config.vocabulary;
        self.entities(queries::down_violations(vocab, focal), "subject")
            .await
    }

    /// Subclasses of `focal` that are instances of `object`.
    pub async fn descendants_instance_of(
        &self,
        focal: &EntityId,
        object: &EntityId,
    ) -> Result<Vec<EntityId>, AppError> {
        let vocab = &self.config.vocabulary;
        self.entities(queries::down_hypothetical(vocab, focal, object), "subject")
            .await
    }

    async fn entities(&self, template: Template, column: &str) -> Result<Vec<EntityId>, AppError> {
        let rows = self.graph.query(template).fetch_all().await?;
        self.decode_entities(&rows, column)
    }

    fn decode_entities(&self, rows: &[Row], column: &str) -> Result<Vec<EntityId>, AppError> {
        let mut seen = HashSet::new();
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let id = self.config.vocabulary.entity(row.value(column)?)?;
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}
