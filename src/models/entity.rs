//! Entity identifiers for nodes in the knowledge graph.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One uppercase letter followed by digits, e.g. `Q42` or `P279`.
static ENTITY_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][0-9]+$").expect("entity id pattern is valid"));

/// Identifier of a node in the knowledge graph.
///
/// The identifier is opaque: the only structure taxolint relies on is its
/// lexical shape, which keeps it safe to splice into SPARQL as a prefixed
/// name. Analysis code expects ids that are already normalized; use
/// [`EntityId::normalize`] at the edges where user input arrives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Validates `id` without altering it.
    pub fn new(id: impl Into<String>) -> Result<Self, AppError> {
        let id = id.into();
        if ENTITY_SHAPE.is_match(&id) {
            Ok(Self(id))
        } else {
            Err(AppError::InvalidEntityId(id))
        }
    }

    /// Trims and uppercases user input before validating it (`" q42"` -> `Q42`).
    pub fn normalize(input: &str) -> Result<Self, AppError> {
        Self::new(input.trim().to_uppercase())
    }

    /// Extracts an id from an IRI such as `http://www.wikidata.org/entity/Q42`.
    ///
    /// Fails with [`AppError::Decode`] when the IRI is outside `prefix` or the
    /// remainder is not an entity id.
    pub fn from_iri(iri: &str, prefix: &str) -> Result<Self, AppError> {
        iri.strip_prefix(prefix)
            .filter(|rest| ENTITY_SHAPE.is_match(rest))
            .map(|rest| Self(rest.to_string()))
            .ok_or_else(|| AppError::Decode(format!("not an entity IRI under {}: {}", prefix, iri)))
    }

    /// Wraps a literal that is known to have the entity shape.
    pub(crate) fn from_static(id: &'static str) -> Self {
        debug_assert!(ENTITY_SHAPE.is_match(id), "{id} is not an entity id");
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WD: &str = "http://www.wikidata.org/entity/";

    #[test]
    fn test_accepts_letter_and_digits() {
        assert_eq!(EntityId::new("Q42").unwrap().as_str(), "Q42");
        assert_eq!(EntityId::new("P279").unwrap().as_str(), "P279");
    }

    #[test]
    fn test_rejects_other_shapes() {
        for bad in ["", "Q", "42", "q42", "Q42a", "Q 42", "wd:Q42", "QQ1"] {
            assert!(
                matches!(EntityId::new(bad), Err(AppError::InvalidEntityId(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalize_trims_and_uppercases() {
        assert_eq!(EntityId::normalize("  q5 ").unwrap().as_str(), "Q5");
        assert!(EntityId::normalize("q5x").is_err());
    }

    #[test]
    fn test_from_iri() {
        let id = EntityId::from_iri("http://www.wikidata.org/entity/Q31", WD).unwrap();
        assert_eq!(id.as_str(), "Q31");
    }

    #[test]
    fn test_from_iri_rejects_foreign_values() {
        assert!(matches!(
            EntityId::from_iri("http://example.org/Q31", WD),
            Err(AppError::Decode(_))
        ));
        assert!(matches!(
            EntityId::from_iri("http://www.wikidata.org/entity/L7-S1", WD),
            Err(AppError::Decode(_))
        ));
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = EntityId::new("Q150").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Q150\"");

        let parsed: EntityId = serde_json::from_str("\"Q150\"").unwrap();
        assert_eq!(parsed, id);
        assert!(serde_json::from_str::<EntityId>("\"nope\"").is_err());
    }
}
