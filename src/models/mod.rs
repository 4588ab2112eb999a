//! Domain models for taxonomy analysis.

mod entity;
mod relation;
mod violation;

pub use entity::EntityId;
pub use relation::{HypotheticalStatement, Relation};
pub use violation::{
    AntipatternCheck, AntipatternReport, Direction, Directions, Partition, ViolationSet,
};
