//! SPARQL query composition.
//!
//! Every function returns a [`Template`] with its placeholders already
//! bound, so rendering can only fail on a malformed template.
//!
//! Entity-valued results are restricted to the vocabulary's entity
//! namespace. Blank nodes and skolem IRIs (such as Wikidata's `genid`
//! values for unknown superclasses) never reach the decoder.

use std::fmt::Write as _;

use crate::graph::{Template, Vocabulary};
use crate::models::{EntityId, Relation};

const CLOSURE: &str = "SELECT DISTINCT ?object WHERE {
  $subject $subclass_of ?object .
  FILTER(STRSTARTS(STR(?object), $entities))
}";

const UP_VIOLATIONS: &str = "SELECT DISTINCT ?object WHERE {
  $focal $instance_of ?object .
  $focal $subclass_of ?object .
  FILTER(STRSTARTS(STR(?object), $entities))
}";

const DOWN_VIOLATIONS: &str = "SELECT DISTINCT ?subject WHERE {
  ?subject $instance_of $focal .
  ?subject $subclass_of $focal .
  FILTER(STRSTARTS(STR(?subject), $entities))
}";

const DOWN_HYPOTHETICAL: &str = "SELECT DISTINCT ?subject WHERE {
  ?subject $subclass_of $focal .
  ?subject $instance_of $object .
  FILTER(STRSTARTS(STR(?subject), $entities))
}";

/// Every X with `subject SUBCLASS_OF+ X`.
pub fn closure(vocab: &Vocabulary, subject: &EntityId) -> Template {
    Template::new(CLOSURE)
        .bind("subject", subject)
        .bind("entities", vocab.entity_namespace())
        .bind("subclass_of", vocab.predicate(Relation::SubclassOf))
}

/// Every X the focal entity is both an instance and a subclass of.
pub fn up_violations(vocab: &Vocabulary, focal: &EntityId) -> Template {
    Template::new(UP_VIOLATIONS)
        .bind("focal", focal)
        .bind("entities", vocab.entity_namespace())
        .bind("instance_of", vocab.predicate(Relation::InstanceOf))
        .bind("subclass_of", vocab.predicate(Relation::SubclassOf))
}

/// Every S that is both an instance and a subclass of the focal entity.
pub fn down_violations(vocab: &Vocabulary, focal: &EntityId) -> Template {
    Template::new(DOWN_VIOLATIONS)
        .bind("focal", focal)
        .bind("entities", vocab.entity_namespace())
        .bind("instance_of", vocab.predicate(Relation::InstanceOf))
        .bind("subclass_of", vocab.predicate(Relation::SubclassOf))
}

/// Every subclass S of the focal entity that is an instance of `object`.
pub fn down_hypothetical(vocab: &Vocabulary, focal: &EntityId, object: &EntityId) -> Template {
    Template::new(DOWN_HYPOTHETICAL)
        .bind("focal", focal)
        .bind("entities", vocab.entity_namespace())
        .bind("object", object)
        .bind("instance_of", vocab.predicate(Relation::InstanceOf))
        .bind("subclass_of", vocab.predicate(Relation::SubclassOf))
}

/// One boolean `?probe<i>` per candidate, answering `subject relation candidate<i>`.
pub fn probe(
    vocab: &Vocabulary,
    subject: &EntityId,
    relation: Relation,
    candidates: &[EntityId],
) -> Template {
    let mut text = String::from("SELECT * WHERE {\n");
    for i in 0..candidates.len() {
        let _ = writeln!(
            text,
            "  BIND(EXISTS {{ $subject $predicate $candidate{i} }} AS ?probe{i})"
        );
    }
    text.push('}');

    candidates.iter().enumerate().fold(
        Template::new(text)
            .bind("subject", subject)
            .bind("predicate", vocab.predicate(relation)),
        |template, (i, candidate)| template.bind(format!("candidate{i}"), candidate),
    )
}

/// Optional `?label<i>` per present item, in the configured language.
///
/// Absent items keep their index so callers can align results positionally.
pub fn labels(vocab: &Vocabulary, items: &[Option<EntityId>]) -> Template {
    let mut text = String::from("SELECT * WHERE {\n");
    for (i, _) in items.iter().enumerate().filter(|(_, item)| item.is_some()) {
        let _ = writeln!(
            text,
            "  OPTIONAL {{ $item{i} rdfs:label ?label{i} . FILTER(LANG(?label{i}) = $lang) }}"
        );
    }
    text.push('}');

    items.iter().enumerate().fold(
        Template::new(text).bind("lang", vocab.label_language()),
        |template, (i, item)| match item {
            Some(id) => template.bind(format!("item{i}"), id),
            None => template,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> EntityId {
        EntityId::new(s).unwrap()
    }

    #[test]
    fn test_closure_uses_transitive_subclass() {
        let sparql = closure(&Vocabulary::default(), &id("Q5")).render().unwrap();
        assert_eq!(
            sparql,
            "SELECT DISTINCT ?object WHERE {\n  wd:Q5 wdt:P279+ ?object .\n  \
             FILTER(STRSTARTS(STR(?object), \"http://www.wikidata.org/entity/\"))\n}"
        );
    }

    #[test]
    fn test_entity_results_are_restricted_to_entity_namespace() {
        let vocab = Vocabulary {
            entity_prefix: "http://example.org/entity/".to_string(),
            ..Vocabulary::default()
        };
        let filter = "FILTER(STRSTARTS(STR(?object), \"http://example.org/entity/\"))";

        assert!(closure(&vocab, &id("Q1")).render().unwrap().contains(filter));
        assert!(up_violations(&vocab, &id("Q1")).render().unwrap().contains(filter));

        let subject_filter = filter.replace("?object", "?subject");
        assert!(down_violations(&vocab, &id("Q1"))
            .render()
            .unwrap()
            .contains(&subject_filter));
        assert!(down_hypothetical(&vocab, &id("Q1"), &id("Q2"))
            .render()
            .unwrap()
            .contains(&subject_filter));
    }

    #[test]
    fn test_up_and_down_violations() {
        let vocab = Vocabulary::default();

        let up = up_violations(&vocab, &id("Q1")).render().unwrap();
        assert!(up.contains("wd:Q1 wdt:P31 ?object ."));
        assert!(up.contains("wd:Q1 wdt:P279+ ?object ."));

        let down = down_violations(&vocab, &id("Q1")).render().unwrap();
        assert!(down.contains("?subject wdt:P31 wd:Q1 ."));
        assert!(down.contains("?subject wdt:P279+ wd:Q1 ."));
    }

    #[test]
    fn test_down_hypothetical() {
        let sparql = down_hypothetical(&Vocabulary::default(), &id("Q1"), &id("Q2"))
            .render()
            .unwrap();
        assert!(sparql.contains("?subject wdt:P279+ wd:Q1 ."));
        assert!(sparql.contains("?subject wdt:P31 wd:Q2 ."));
    }

    #[test]
    fn test_probe_binds_each_candidate_by_index() {
        let candidates: Vec<EntityId> = (0..12).map(|n| id(&format!("Q{}", 100 + n))).collect();
        let sparql = probe(&Vocabulary::default(), &id("Q1"), Relation::InstanceOf, &candidates)
            .render()
            .unwrap();

        assert!(sparql.contains("BIND(EXISTS { wd:Q1 wdt:P31 wd:Q101 } AS ?probe1)"));
        assert!(sparql.contains("BIND(EXISTS { wd:Q1 wdt:P31 wd:Q110 } AS ?probe10)"));
        assert!(sparql.contains("BIND(EXISTS { wd:Q1 wdt:P31 wd:Q111 } AS ?probe11)"));
        assert_eq!(sparql.matches("BIND(").count(), 12);
    }

    #[test]
    fn test_labels_skip_absent_items_but_keep_indices() {
        let items = vec![Some(id("Q5")), None, Some(id("Q42"))];
        let sparql = labels(&Vocabulary::default(), &items).render().unwrap();

        assert!(sparql.contains("wd:Q5 rdfs:label ?label0"));
        assert!(sparql.contains("wd:Q42 rdfs:label ?label2"));
        assert!(!sparql.contains("?label1"));
        assert!(sparql.contains("FILTER(LANG(?label2) = \"en\")"));
    }
}
