//! Core types for the Rapport relation-fact engine.
//!
//! This crate holds the data model shared by every other crate: relation
//! facts about a person, the closed relation-type vocabulary, and the label
//! normalisation used for every comparison. It performs no I/O.

pub mod error;
pub mod relation;

pub use error::{Error, Result};
pub use relation::{
  Confidence, Intensity, RelationFact, RelationRole, RelationSource,
  RelationStatus, RelationType, normalize_label,
};
