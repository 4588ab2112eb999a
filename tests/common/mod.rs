//! In-memory SPARQL double for analysis tests.
//!
//! Recognizes the query shapes composed by `taxolint::repositories::queries`
//! and answers them from explicit edge lists.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use taxolint::config::Config;
use taxolint::context::Context;
use taxolint::error::AppError;
use taxolint::graph::{Binding, Row, RowStream, SparqlExecutor};

const ENTITY_PREFIX: &str = "http://www.wikidata.org/entity/";
const GENID_PREFIX: &str = "http://www.wikidata.org/.well-known/genid/";

static CLOSURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"WHERE \{\s*wd:(\w+) wdt:P279\+ \?object \.").unwrap());
static UP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"wd:(\w+) wdt:P31 \?object \.\s*wd:\w+ wdt:P279\+ \?object \.").unwrap()
});
static DOWN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\?subject wdt:P31 wd:(\w+) \.\s*\?subject wdt:P279\+ wd:\w+ \.").unwrap()
});
static DOWN_HYPOTHETICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\?subject wdt:P279\+ wd:(\w+) \.\s*\?subject wdt:P31 wd:(\w+) \.").unwrap()
});
static PROBE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"BIND\(EXISTS \{ wd:(\w+) wdt:(P\d+)(\+?) wd:(\w+) \} AS \?(probe\d+)\)").unwrap()
});
static LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"OPTIONAL \{ wd:(\w+) rdfs:label \?(label\d+) \. FILTER\(LANG\(\?label\d+\) = "(\w+)"\) \}"#)
        .unwrap()
});

/// A tiny taxonomy answering the composed AP1 queries.
#[derive(Default)]
pub struct SyntheticGraph {
    instance_of: Vec<(String, String)>,
    subclass_of: Vec<(String, String)>,
    labels: HashMap<String, String>,
    delay: Option<Duration>,
    failing: Option<String>,
    batch_rows: Option<usize>,
    queries: Mutex<Vec<String>>,
}

impl SyntheticGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `subject P31 object`.
    pub fn instance(mut self, subject: &str, object: &str) -> Self {
        self.instance_of.push((subject.into(), object.into()));
        self
    }

    /// Adds `subject P279 object`.
    pub fn subclass(mut self, subject: &str, object: &str) -> Self {
        self.subclass_of.push((subject.into(), object.into()));
        self
    }

    /// Adds an English label.
    pub fn label(mut self, id: &str, text: &str) -> Self {
        self.labels.insert(id.into(), text.into());
        self
    }

    /// Delays every answer.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fails every query containing `fragment` with a graph query error.
    pub fn failing(mut self, fragment: &str) -> Self {
        self.failing = Some(fragment.into());
        self
    }

    /// Answers batched `BIND(EXISTS ...)` queries with `count` copies of
    /// the boolean row instead of exactly one.
    pub fn batch_rows(mut self, count: usize) -> Self {
        self.batch_rows = Some(count);
        self
    }

    pub fn into_context(self) -> (Arc<Self>, Context) {
        self.into_context_with(Config::default())
    }

    pub fn into_context_with(self, config: Config) -> (Arc<Self>, Context) {
        let graph = Arc::new(self);
        let ctx = Context::new(graph.clone(), config);
        (graph, ctx)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Every X with `id P279+ X`.
    fn superclasses(&self, id: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            for (_, sup) in self.subclass_of.iter().filter(|(sub, _)| sub == current) {
                if seen.insert(sup.as_str()) {
                    order.push(sup.clone());
                    queue.push_back(sup);
                }
            }
        }
        order
    }

    fn is_instance(&self, subject: &str, object: &str) -> bool {
        self.instance_of.iter().any(|(s, o)| s == subject && o == object)
    }

    fn is_subclass(&self, subject: &str, object: &str) -> bool {
        self.superclasses(subject).iter().any(|s| s == object)
    }

    fn nodes(&self) -> Vec<String> {
        let mut nodes = Vec::new();
        for (a, b) in self.instance_of.iter().chain(&self.subclass_of) {
            for n in [a, b] {
                if !nodes.contains(n) {
                    nodes.push(n.clone());
                }
            }
        }
        nodes
    }

    /// Nodes named `genid...` stand for skolemized unknown values.
    fn iri(id: &str) -> String {
        if id.starts_with("genid") {
            format!("{}{}", GENID_PREFIX, id)
        } else {
            format!("{}{}", ENTITY_PREFIX, id)
        }
    }

    /// Rows of entity IRIs, honoring a `STRSTARTS` namespace filter on `column`.
    fn entity_rows(sparql: &str, column: &str, ids: impl IntoIterator<Item = String>) -> Vec<Row> {
        let filter = format!(r#"FILTER(STRSTARTS(STR(?{}), "{}"))"#, column, ENTITY_PREFIX);
        let restricted = sparql.contains(&filter);
        ids.into_iter()
            .map(|id| Self::iri(&id))
            .filter(|iri| !restricted || iri.starts_with(ENTITY_PREFIX))
            .map(|iri| [(column, Binding::iri(iri))].into_iter().collect())
            .collect()
    }

    fn answer(&self, sparql: &str) -> Result<Vec<Row>, AppError> {
        if let Some(fragment) = self.failing.as_deref().filter(|f| sparql.contains(f)) {
            return Err(AppError::graph_query(
                format!("endpoint unavailable for {:?}", fragment),
                sparql,
            ));
        }
        if let Some(c) = CLOSURE.captures(sparql) {
            return Ok(Self::entity_rows(sparql, "object", self.superclasses(&c[1])));
        }
        if let Some(c) = UP.captures(sparql) {
            let focal = &c[1];
            let ids = self
                .superclasses(focal)
                .into_iter()
                .filter(|x| self.is_instance(focal, x));
            return Ok(Self::entity_rows(sparql, "object", ids));
        }
        if let Some(c) = DOWN.captures(sparql) {
            let focal = &c[1];
            let ids = self
                .nodes()
                .into_iter()
                .filter(|s| self.is_instance(s, focal) && self.is_subclass(s, focal));
            return Ok(Self::entity_rows(sparql, "subject", ids));
        }
        if let Some(c) = DOWN_HYPOTHETICAL.captures(sparql) {
            let (focal, object) = (&c[1], &c[2]);
            let ids = self
                .nodes()
                .into_iter()
                .filter(|s| self.is_subclass(s, focal) && self.is_instance(s, object));
            return Ok(Self::entity_rows(sparql, "subject", ids));
        }
        if PROBE.is_match(sparql) {
            let row: Row = PROBE
                .captures_iter(sparql)
                .map(|c| {
                    let holds = match (&c[2], &c[3]) {
                        ("P31", "") => self.is_instance(&c[1], &c[4]),
                        ("P279", "+") => self.is_subclass(&c[1], &c[4]),
                        other => panic!("unexpected probe predicate {:?}", other),
                    };
                    (c[5].to_string(), Binding::boolean(holds))
                })
                .collect();
            return Ok(vec![row; self.batch_rows.unwrap_or(1)]);
        }
        if LABEL.is_match(sparql) {
            let row: Row = LABEL
                .captures_iter(sparql)
                .filter_map(|c| {
                    let text = self.labels.get(&c[1])?;
                    Some((c[2].to_string(), Binding::literal(text.clone(), Some(&c[3]))))
                })
                .collect();
            return Ok(vec![row]);
        }
        Err(AppError::graph_query("unrecognized query shape", sparql))
    }
}

#[async_trait]
impl SparqlExecutor for SyntheticGraph {
    async fn execute_sparql(&self, sparql: &str) -> Result<RowStream<'_>, AppError> {
        self.queries.lock().unwrap().push(sparql.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let rows = self.answer(sparql)?;
        Ok(Box::pin(futures::stream::iter(rows.into_iter().map(Ok))))
    }
}
