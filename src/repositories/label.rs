//! Label lookup for display purposes.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::context::{AppGraph, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::{QueryExt, Row};
use crate::models::EntityId;
use crate::repositories::queries;

/// Repository resolving entity labels in the configured language.
#[derive(FromContext, Clone)]
pub struct LabelRepository {
    graph: AppGraph,
    config: Arc<Config>,
}

impl LabelRepository {
    /// Labels for every present entry, keyed by entity.
    ///
    /// `None` entries are skipped. Entities without a label in the
    /// configured language are missing from the map.
    pub async fn labels(
        &self,
        items: &[Option<EntityId>],
    ) -> Result<HashMap<EntityId, String>, AppError> {
        if items.iter().all(Option::is_none) {
            return Ok(HashMap::new());
        }

        let template = queries::labels(&self.config.vocabulary, items);
        let rows = self.graph.query(template).fetch_all().await?;

        let mut labels = HashMap::new();
        for row in &rows {
            labels.extend(decode_label_row(row, items)?);
        }
        tracing::debug!(
            requested = items.iter().flatten().count(),
            resolved = labels.len(),
            "Resolved labels"
        );
        Ok(labels)
    }
}

/// Maps each bound `?label<i>` back to `items[i]`.
pub fn decode_label_row(
    row: &Row,
    items: &[Option<EntityId>],
) -> Result<Vec<(EntityId, String)>, AppError> {
    row.indexed("label")?
        .into_iter()
        .map(|(index, binding)| match items.get(index) {
            Some(Some(id)) => Ok((id.clone(), binding.value.clone())),
            _ => Err(AppError::Decode(format!(
                "label{} does not correspond to a requested entity",
                index
            ))),
        })
        .collect()
}
