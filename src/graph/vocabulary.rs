//! Binding of the abstract relations to a concrete graph's IRIs.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::graph::template::{Literal, Predicate};
use crate::models::{EntityId, Relation};

/// IRI prefixes and property ids of the target knowledge graph.
///
/// Defaults describe Wikidata. Queries use the `wd:`, `wdt:` and `rdfs:`
/// prefixes, declared by [`Vocabulary::prologue`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Namespace of entity IRIs, bound to `wd:`.
    pub entity_prefix: String,
    /// Namespace of direct-claim properties, bound to `wdt:`.
    pub property_prefix: String,
    /// Property id of the INSTANCE_OF relation.
    pub instance_of: EntityId,
    /// Property id of the SUBCLASS_OF relation.
    pub subclass_of: EntityId,
    /// Language tag used when resolving labels.
    pub label_language: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            entity_prefix: "http://www.wikidata.org/entity/".to_string(),
            property_prefix: "http://www.wikidata.org/prop/direct/".to_string(),
            instance_of: EntityId::from_static("P31"),
            subclass_of: EntityId::from_static("P279"),
            label_language: "en".to_string(),
        }
    }
}

impl Vocabulary {
    /// PREFIX declarations for every prefixed name the composed queries use.
    pub fn prologue(&self) -> String {
        format!(
            "PREFIX wd: <{}>\nPREFIX wdt: <{}>\nPREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>\n",
            self.entity_prefix, self.property_prefix
        )
    }

    /// Predicate path for a relation. SUBCLASS_OF is always transitive.
    pub fn predicate(&self, relation: Relation) -> Predicate {
        match relation {
            Relation::InstanceOf => Predicate::direct(self.instance_of.clone()),
            Relation::SubclassOf => Predicate::transitive(self.subclass_of.clone()),
        }
    }

    /// Resolves a relation by configured property id (`P31`) or by name
    /// (`instance_of`, `subclass-of`), case-insensitively.
    pub fn relation(&self, input: &str) -> Result<Relation, AppError> {
        let key = input.trim().to_ascii_lowercase().replace('-', "_");
        if key == self.instance_of.as_str().to_ascii_lowercase() || key == "instance_of" {
            Ok(Relation::InstanceOf)
        } else if key == self.subclass_of.as_str().to_ascii_lowercase() || key == "subclass_of" {
            Ok(Relation::SubclassOf)
        } else {
            Err(AppError::InvalidHypothesis(format!(
                "unrecognized relation {:?} (expected {}, {}, instance_of or subclass_of)",
                input, self.instance_of, self.subclass_of
            )))
        }
    }

    /// Decodes an entity IRI returned by the service.
    pub fn entity(&self, iri: &str) -> Result<EntityId, AppError> {
        EntityId::from_iri(iri, &self.entity_prefix)
    }

    /// Entity IRI prefix as a SPARQL literal, for `STRSTARTS` filters.
    pub fn entity_namespace(&self) -> Literal<'_> {
        Literal(&self.entity_prefix)
    }

    /// Language tag as a SPARQL literal.
    pub fn label_language(&self) -> Literal<'_> {
        Literal(&self.label_language)
    }
}
