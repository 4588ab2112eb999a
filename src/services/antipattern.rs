//! AP1 antipattern detection.
//!
//! An entity that is both an INSTANCE_OF and a transitive SUBCLASS_OF the
//! same class mixes the individual and class levels of the taxonomy. The
//! service reports such overlaps around a focal entity, in the graph as it
//! stands and as it would be after one hypothetical statement.

use std::future::Future;
use std::sync::Arc;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{
    AntipatternCheck, AntipatternReport, Direction, Directions, EntityId, HypotheticalStatement,
    Relation, ViolationSet,
};
use crate::repositories::{ProbeRepository, TaxonomyRepository};

/// Service detecting AP1 violations above and below a focal entity.
#[derive(FromContext, Clone)]
pub struct AntipatternService {
    taxonomy: TaxonomyRepository,
    probes: ProbeRepository,
    config: Arc<Config>,
}

impl AntipatternService {
    /// Violations where the focal entity is both instance and subclass of a class.
    ///
    /// With `instance_of X`, X becomes a violation when the focal entity is
    /// already a subclass of X. With `subclass_of N`, every class in N's
    /// closure (and N itself) the focal entity is an instance of becomes one.
    pub async fn analyze_up(
        &self,
        focal: &EntityId,
        hypothesis: Option<&HypotheticalStatement>,
    ) -> Result<ViolationSet, AppError> {
        self.within_deadline(self.up(focal, hypothesis)).await
    }

    /// Violations where descendants of the focal entity are also its instances.
    ///
    /// Only a `subclass_of` hypothesis can introduce new violations below the
    /// focal entity; an `instance_of` hypothesis yields none.
    pub async fn analyze_down(
        &self,
        focal: &EntityId,
        hypothesis: Option<&HypotheticalStatement>,
    ) -> Result<ViolationSet, AppError> {
        self.within_deadline(self.down(focal, hypothesis)).await
    }

    /// Both directions, queried concurrently.
    pub async fn analyze(
        &self,
        focal: &EntityId,
        hypothesis: Option<&HypotheticalStatement>,
    ) -> Result<AntipatternReport, AppError> {
        tracing::info!(
            focal = %focal,
            hypothesis = ?hypothesis.map(|h| (h.relation, h.object.as_str())),
            "Analyzing AP1"
        );

        let (up, down) = self
            .within_deadline(async {
                tokio::try_join!(self.up(focal, hypothesis), self.down(focal, hypothesis))
            })
            .await?;

        Ok(AntipatternReport {
            focal: focal.clone(),
            hypothesis: hypothesis.cloned(),
            up,
            down,
        })
    }

    /// Analyzes the selected directions.
    pub async fn check(
        &self,
        focal: &EntityId,
        hypothesis: Option<&HypotheticalStatement>,
        directions: Directions,
    ) -> Result<AntipatternCheck, AppError> {
        let hypothesis_owned = hypothesis.cloned();
        match directions {
            Directions::Both => Ok(self.analyze(focal, hypothesis).await?.into()),
            Directions::Up => {
                let up = self.analyze_up(focal, hypothesis).await?;
                Ok(AntipatternCheck::new(focal.clone(), hypothesis_owned, vec![up]))
            }
            Directions::Down => {
                let down = self.analyze_down(focal, hypothesis).await?;
                Ok(AntipatternCheck::new(focal.clone(), hypothesis_owned, vec![down]))
            }
        }
    }

    async fn up(
        &self,
        focal: &EntityId,
        hypothesis: Option<&HypotheticalStatement>,
    ) -> Result<ViolationSet, AppError> {
        let existent = self.taxonomy.shared_ancestors(focal).await?;

        let hypothetical = match hypothesis {
            None => Vec::new(),
            Some(HypotheticalStatement {
                relation: Relation::InstanceOf,
                object,
            }) => {
                if self.probes.is_subclass_of(focal, object).await? {
                    vec![object.clone()]
                } else {
                    Vec::new()
                }
            }
            Some(HypotheticalStatement {
                relation: Relation::SubclassOf,
                object,
            }) => {
                let mut candidates = self.taxonomy.superclasses(object).await?;
                if !candidates.contains(object) {
                    candidates.push(object.clone());
                }
                self.probes
                    .probe(focal, Relation::InstanceOf, &candidates)
                    .await?
                    .matched
            }
        };

        tracing::info!(
            focal = %focal,
            direction = %Direction::Up,
            existent = existent.len(),
            hypothetical = hypothetical.len(),
            "AP1 direction analyzed"
        );
        Ok(ViolationSet::new(Direction::Up, existent, hypothetical))
    }

    async fn down(
        &self,
        focal: &EntityId,
        hypothesis: Option<&HypotheticalStatement>,
    ) -> Result<ViolationSet, AppError> {
        let existent = self.taxonomy.dual_classified_descendants(focal).await?;

        let hypothetical = match hypothesis {
            Some(HypotheticalStatement {
                relation: Relation::SubclassOf,
                object,
            }) => self.taxonomy.descendants_instance_of(focal, object).await?,
            _ => Vec::new(),
        };

        tracing::info!(
            focal = %focal,
            direction = %Direction::Down,
            existent = existent.len(),
            hypothetical = hypothetical.len(),
            "AP1 direction analyzed"
        );
        Ok(ViolationSet::new(Direction::Down, existent, hypothetical))
    }

    async fn within_deadline<T>(
        &self,
        analysis: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        let deadline = self.config.analysis.deadline();
        tokio::time::timeout(deadline, analysis)
            .await
            .map_err(|_| {
                tracing::warn!(?deadline, "AP1 analysis exceeded its deadline");
                AppError::Timeout(deadline)
            })?
    }
}
