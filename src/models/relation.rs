//! Relations between entities and hypothetical statements about them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::graph::Vocabulary;
use crate::models::EntityId;

/// The two relations the AP1 check reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Direct membership of an individual in a class.
    InstanceOf,
    /// Specialization between classes, always followed transitively.
    SubclassOf,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::InstanceOf => f.write_str("instance_of"),
            Relation::SubclassOf => f.write_str("subclass_of"),
        }
    }
}

/// A proposed, not yet committed edge `focal -relation-> object`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypotheticalStatement {
    pub relation: Relation,
    pub object: EntityId,
}

impl HypotheticalStatement {
    pub fn new(relation: Relation, object: EntityId) -> Self {
        Self { relation, object }
    }

    /// Builds an optional statement from raw user input.
    ///
    /// Both parts absent means "no hypothesis". A single missing part or an
    /// unknown relation is rejected before any query runs.
    pub fn from_parts(
        relation: Option<&str>,
        object: Option<&str>,
        vocab: &Vocabulary,
    ) -> Result<Option<Self>, AppError> {
        let relation = relation.map(str::trim).filter(|s| !s.is_empty());
        let object = object.map(str::trim).filter(|s| !s.is_empty());

        match (relation, object) {
            (None, None) => Ok(None),
            (Some(relation), Some(object)) => {
                let relation = vocab.relation(relation)?;
                let object = EntityId::normalize(object).map_err(|_| {
                    AppError::InvalidHypothesis(format!("invalid object entity {:?}", object))
                })?;
                Ok(Some(Self::new(relation, object)))
            }
            (Some(_), None) => Err(AppError::InvalidHypothesis(
                "a relation was given without an object entity".to_string(),
            )),
            (None, Some(_)) => Err(AppError::InvalidHypothesis(
                "an object entity was given without a relation".to_string(),
            )),
        }
    }
}
