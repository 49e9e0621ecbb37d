//! Conflict records produced by the detector. Never persisted.

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
  /// Opposing relation types about the same object ("likes X" / "dislikes X").
  DirectContradiction,
  /// A food the person consumes contains something they are sensitive to.
  IngredientConflict,
  /// A food the person consumes violates a diet they follow.
  LogicalImplication,
}

impl ConflictType {
  /// The fixed severity of each conflict type.
  pub fn severity(self) -> Severity {
    match self {
      Self::DirectContradiction => Severity::Critical,
      Self::IngredientConflict => Severity::High,
      Self::LogicalImplication => Severity::High,
    }
  }
}

/// Ordered from least to most severe.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Low,
  Medium,
  High,
  Critical,
}

impl Severity {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
      Self::Critical => "critical",
    }
  }
}

impl std::fmt::Display for Severity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// An incompatibility between a candidate fact and one existing fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
  #[serde(rename = "type")]
  pub conflict_type:       ConflictType,
  pub severity:            Severity,
  /// A sentence naming both sides, suitable for showing to the user.
  pub description:         String,
  /// A short derivation, e.g. "fries contains potato".
  pub reasoning:           String,
  pub related_relation_id: Option<Uuid>,
}

impl Conflict {
  pub fn new(
    conflict_type: ConflictType,
    description: impl Into<String>,
    reasoning: impl Into<String>,
    related_relation_id: Option<Uuid>,
  ) -> Self {
    Self {
      conflict_type,
      severity: conflict_type.severity(),
      description: description.into(),
      reasoning: reasoning.into(),
      related_relation_id,
    }
  }

  pub fn is_critical(&self) -> bool { self.severity == Severity::Critical }
}
