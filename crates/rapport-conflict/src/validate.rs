//! The validator: folds detected conflicts into a save decision.

use rapport_core::RelationFact;
use rapport_food::KnowledgeBase;
use serde::Serialize;

use crate::{conflict::Conflict, detect::Detector, gate::Disposition};

/// The outcome of validating one candidate fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
  /// False if and only if some conflict is critical.
  pub valid:                bool,
  pub conflicts:            Vec<Conflict>,
  /// Descriptions of every non-critical conflict, for display.
  pub warnings:             Vec<String>,
  /// True whenever there is any conflict at all.
  pub requires_user_review: bool,
}

impl ValidationResult {
  /// No conflicts; the fact can be saved as-is.
  pub fn clean() -> Self { Self::from_conflicts(Vec::new()) }

  pub fn from_conflicts(conflicts: Vec<Conflict>) -> Self {
    let valid = !conflicts.iter().any(Conflict::is_critical);
    let warnings = conflicts
      .iter()
      .filter(|c| !c.is_critical())
      .map(|c| c.description.clone())
      .collect();
    Self {
      valid,
      requires_user_review: !conflicts.is_empty(),
      warnings,
      conflicts,
    }
  }

  /// What the caller should do with the candidate.
  pub fn disposition(&self) -> Disposition {
    match (self.valid, self.requires_user_review) {
      (false, _) => Disposition::Reject,
      (true, true) => Disposition::SaveForReview,
      (true, false) => Disposition::Save,
    }
  }
}

/// Validates candidates against a particular knowledge base.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'kb> {
  detector: Detector<'kb>,
}

impl Default for Validator<'static> {
  fn default() -> Self {
    Self {
      detector: Detector::default(),
    }
  }
}

impl<'kb> Validator<'kb> {
  pub fn new(kb: &'kb KnowledgeBase) -> Self {
    Self {
      detector: Detector::new(kb),
    }
  }

  pub fn detector(&self) -> Detector<'kb> { self.detector }

  /// Run the detector once and classify the result. Never fails: a blank
  /// candidate label is simply a clean result.
  pub fn validate<'a>(
    &self,
    candidate: &RelationFact,
    existing: impl IntoIterator<Item = &'a RelationFact>,
  ) -> ValidationResult {
    if candidate.is_blank() {
      return ValidationResult::clean();
    }

    let conflicts = self.detector.detect(candidate, existing);
    let result = ValidationResult::from_conflicts(conflicts);
    if !result.valid {
      tracing::info!(
        candidate = %candidate.id,
        conflicts = result.conflicts.len(),
        "candidate rejected by critical conflict"
      );
    } else if result.requires_user_review {
      tracing::debug!(
        candidate = %candidate.id,
        warnings = result.warnings.len(),
        "candidate routed to review"
      );
    }
    result
  }
}

/// [`Validator::validate`] against the shared built-in knowledge base.
pub fn validate_relation<'a>(
  candidate: &RelationFact,
  existing: impl IntoIterator<Item = &'a RelationFact>,
) -> ValidationResult {
  Validator::default().validate(candidate, existing)
}
