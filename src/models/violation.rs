//! Analysis results.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{EntityId, HypotheticalStatement};

/// Which side of the focal entity a violation is framed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The focal entity sits below a shared ancestor.
    Up,
    /// Descendants sit below the focal entity.
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// Violations found in one direction.
///
/// Both lists keep the order the service returned, which is not stable
/// across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationSet {
    pub direction: Direction,
    /// Violations already present in the graph.
    pub existent: Vec<EntityId>,
    /// Violations the hypothetical statement would introduce.
    pub hypothetical: Vec<EntityId>,
}

impl ViolationSet {
    pub fn new(direction: Direction, existent: Vec<EntityId>, hypothetical: Vec<EntityId>) -> Self {
        Self {
            direction,
            existent,
            hypothetical,
        }
    }

    pub fn is_violated(&self) -> bool {
        !self.existent.is_empty()
    }

    pub fn would_be_violated(&self) -> bool {
        !self.hypothetical.is_empty()
    }
}

/// Result of analysing both directions around a focal entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntipatternReport {
    pub focal: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<HypotheticalStatement>,
    pub up: ViolationSet,
    pub down: ViolationSet,
}

/// Which directions a check covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directions {
    Up,
    Down,
    #[default]
    Both,
}

impl FromStr for Directions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Directions::Up),
            "down" => Ok(Directions::Down),
            "both" => Ok(Directions::Both),
            other => Err(format!("unknown direction {:?} (expected up, down or both)", other)),
        }
    }
}

/// A check over the selected directions, optionally with display labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AntipatternCheck {
    pub focal: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<HypotheticalStatement>,
    pub violations: Vec<ViolationSet>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<EntityId, String>,
}

impl AntipatternCheck {
    pub fn new(
        focal: EntityId,
        hypothesis: Option<HypotheticalStatement>,
        violations: Vec<ViolationSet>,
    ) -> Self {
        Self {
            focal,
            hypothesis,
            violations,
            labels: BTreeMap::new(),
        }
    }

    /// Every entity mentioned by the check, focal first, without repeats.
    pub fn mentioned_entities(&self) -> Vec<EntityId> {
        let mut ids = vec![self.focal.clone()];
        let found = self
            .violations
            .iter()
            .flat_map(|set| set.existent.iter().chain(set.hypothetical.iter()));

        for id in self.hypothesis.iter().map(|h| &h.object).chain(found) {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }

    /// `Q5 (human)` when a label is known, `Q5` otherwise.
    pub fn display(&self, id: &EntityId) -> String {
        match self.labels.get(id) {
            Some(label) => format!("{} ({})", id, label),
            None => id.to_string(),
        }
    }
}

impl From<AntipatternReport> for AntipatternCheck {
    fn from(report: AntipatternReport) -> Self {
        Self::new(report.focal, report.hypothesis, vec![report.up, report.down])
    }
}

/// Outcome of a batched probe: candidates split by whether the probed
/// relation holds, each side in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub matched: Vec<EntityId>,
    pub unmatched: Vec<EntityId>,
}
