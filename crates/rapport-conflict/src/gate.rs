//! The review gate: what a caller does with a validation result, and batch
//! aggregation for bulk importers such as the swipe quiz.

use rapport_core::RelationFact;
use serde::Serialize;
use uuid::Uuid;

use crate::validate::{ValidationResult, Validator};

const MISSING_LABEL: &str = "missing object label";

/// The caller-side action for a validated candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
  /// No conflicts; persist immediately.
  Save,
  /// Non-critical conflicts; persist as pending review and show warnings.
  SaveForReview,
  /// A critical conflict; do not persist as given.
  Reject,
}

impl Disposition {
  /// Whether the candidate ends up stored (possibly pending review).
  pub fn is_persisted(self) -> bool { !matches!(self, Self::Reject) }
}

/// One candidate's result within a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
  pub relation_id: Uuid,
  pub subject_id:  Uuid,
  pub disposition: Disposition,
  /// Absent when the candidate failed required-field checks and was never
  /// validated.
  pub validation:  Option<ValidationResult>,
  /// Why a candidate failed before validation.
  pub error:       Option<String>,
}

/// Counters shown to the user after a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
  pub saved:          usize,
  pub pending_review: usize,
  pub failed:         usize,
}

impl BatchSummary {
  pub fn record(&mut self, disposition: Disposition) {
    match disposition {
      Disposition::Save => self.saved += 1,
      Disposition::SaveForReview => self.pending_review += 1,
      Disposition::Reject => self.failed += 1,
    }
  }

  pub fn total(&self) -> usize {
    self.saved + self.pending_review + self.failed
  }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
  pub outcomes: Vec<BatchOutcome>,
  pub summary:  BatchSummary,
}

impl Validator<'_> {
  /// Validate `candidates` in order, as a sequential importer would.
  ///
  /// Each candidate is checked against the existing facts of its own subject
  /// plus every earlier candidate of that subject that the gate let through,
  /// so two contradicting answers in one batch are caught. A candidate with
  /// a blank label fails without being validated.
  pub fn validate_batch(
    &self,
    candidates: &[RelationFact],
    existing: &[RelationFact],
  ) -> BatchReport {
    let mut report = BatchReport::default();
    let mut accepted: Vec<&RelationFact> = Vec::new();

    for candidate in candidates {
      if candidate.is_blank() {
        report.summary.record(Disposition::Reject);
        report.outcomes.push(BatchOutcome {
          relation_id: candidate.id,
          subject_id:  candidate.subject_id,
          disposition: Disposition::Reject,
          validation:  None,
          error:       Some(MISSING_LABEL.to_string()),
        });
        continue;
      }

      let context = existing
        .iter()
        .chain(accepted.iter().copied())
        .filter(|fact| fact.subject_id == candidate.subject_id);
      let result = self.validate(candidate, context);
      let disposition = result.disposition();

      report.summary.record(disposition);
      if disposition.is_persisted() {
        accepted.push(candidate);
      }
      report.outcomes.push(BatchOutcome {
        relation_id: candidate.id,
        subject_id: candidate.subject_id,
        disposition,
        validation: Some(result),
        error: None,
      });
    }

    tracing::debug!(
      saved = report.summary.saved,
      pending_review = report.summary.pending_review,
      failed = report.summary.failed,
      "batch validated"
    );
    report
  }
}

/// [`Validator::validate_batch`] against the shared built-in knowledge base.
pub fn validate_batch(
  candidates: &[RelationFact],
  existing: &[RelationFact],
) -> BatchReport {
  Validator::default().validate_batch(candidates, existing)
}
