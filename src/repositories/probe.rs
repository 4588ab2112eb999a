//! Batched existence probes.
//!
//! A probe asks whether `subject relation candidate` holds for many
//! candidates in a single round trip. The service answers with one row
//! carrying a boolean `?probe<i>` per candidate.

use std::sync::Arc;

use crate::config::Config;
use crate::context::{AppGraph, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::{QueryExt, Row};
use crate::models::{EntityId, Partition, Relation};
use crate::repositories::queries;

/// Repository answering relation checks in batches.
#[derive(FromContext, Clone)]
pub struct ProbeRepository {
    graph: AppGraph,
    config: Arc<Config>,
}

impl ProbeRepository {
    /// Splits `candidates` by whether `subject relation candidate` holds.
    ///
    /// Duplicated candidates are probed and reported once per position.
    pub async fn probe(
        &self,
        subject: &EntityId,
        relation: Relation,
        candidates: &[EntityId],
    ) -> Result<Partition, AppError> {
        if candidates.is_empty() {
            return Ok(Partition::default());
        }

        let template = queries::probe(&self.config.vocabulary, subject, relation, candidates);
        let rows = self.graph.query(template).fetch_all().await?;

        let row = match rows.as_slice() {
            [row] => row,
            _ => {
                return Err(AppError::Decode(format!(
                    "probe expected exactly one row, got {}",
                    rows.len()
                )))
            }
        };

        let partition = decode_probe_row(row, candidates)?;
        tracing::debug!(
            subject = %subject,
            %relation,
            candidates = candidates.len(),
            matched = partition.matched.len(),
            "Probe answered"
        );
        Ok(partition)
    }

    /// Whether `sub SUBCLASS_OF+ sup` holds.
    pub async fn is_subclass_of(&self, sub: &EntityId, sup: &EntityId) -> Result<bool, AppError> {
        let partition = self
            .probe(sub, Relation::SubclassOf, std::slice::from_ref(sup))
            .await?;
        Ok(!partition.matched.is_empty())
    }
}

/// Zips the `?probe<i>` fields of a result row against the candidates.
///
/// # Errors
///
/// [`AppError::Decode`] when the field count differs from the candidate
/// count, the indices are not exactly `0..n`, a field has a foreign name, or
/// a value is not a boolean.
pub fn decode_probe_row(row: &Row, candidates: &[EntityId]) -> Result<Partition, AppError> {
    let fields = row.indexed("probe")?;
    if fields.len() != candidates.len() {
        return Err(AppError::Decode(format!(
            "probe returned {} fields for {} candidates",
            fields.len(),
            candidates.len()
        )));
    }

    let mut partition = Partition::default();
    for (position, ((index, binding), candidate)) in fields.into_iter().zip(candidates).enumerate() {
        if index != position {
            return Err(AppError::Decode(format!(
                "probe field probe{} found where probe{} was expected",
                index, position
            )));
        }
        if binding.as_bool()? {
            partition.matched.push(candidate.clone());
        } else {
            partition.unmatched.push(candidate.clone());
        }
    }
    Ok(partition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Binding;

    fn ids(n: usize) -> Vec<EntityId> {
        (0..n).map(|i| EntityId::new(format!("Q{}", 1000 + i)).unwrap()).collect()
    }

    fn probe_row(answers: &[bool]) -> Row {
        answers
            .iter()
            .enumerate()
            .map(|(i, &answer)| (format!("probe{}", i), Binding::boolean(answer)))
            .collect()
    }

    #[test]
    fn test_decode_aligns_double_digit_indices() {
        let candidates = ids(12);
        let mut answers = vec![false; 12];
        answers[10] = true;
        answers[11] = true;

        let partition = decode_probe_row(&probe_row(&answers), &candidates).unwrap();

        assert_eq!(partition.matched, vec![candidates[10].clone(), candidates[11].clone()]);
        assert_eq!(partition.unmatched, candidates[..10].to_vec());
    }

    #[test]
    fn test_decode_keeps_duplicates_positionally() {
        let q = EntityId::new("Q7").unwrap();
        let candidates = vec![q.clone(), q.clone()];

        let partition = decode_probe_row(&probe_row(&[true, false]), &candidates).unwrap();

        assert_eq!(partition.matched, vec![q.clone()]);
        assert_eq!(partition.unmatched, vec![q]);
    }

    #[test]
    fn test_decode_rejects_count_mismatch() {
        let err = decode_probe_row(&probe_row(&[true, true]), &ids(3)).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_gap_in_indices() {
        let row: Row = [
            ("probe0", Binding::boolean(true)),
            ("probe2", Binding::boolean(true)),
        ]
        .into_iter()
        .collect();

        let err = decode_probe_row(&row, &ids(2)).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_non_boolean() {
        let row: Row = [("probe0", Binding::literal("maybe", None))].into_iter().collect();
        let err = decode_probe_row(&row, &ids(1)).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_foreign_field() {
        let row: Row = [
            ("probe0", Binding::boolean(true)),
            ("label0", Binding::literal("x", Some("en"))),
        ]
        .into_iter()
        .collect();

        let err = decode_probe_row(&row, &ids(2)).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }
}
