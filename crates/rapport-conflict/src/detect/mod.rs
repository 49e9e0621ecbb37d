//! Conflict detection.
//!
//! Three rules are run against every (candidate, existing) pair:
//!
//! | Rule | Module | Fires when |
//! |------|--------|------------|
//! | A | [`direct`] | opposing relation types name the same object |
//! | B | [`ingredient`] | a consumed food contains a sensitised ingredient |
//! | C | [`implication`] | a consumed food violates a followed diet |
//!
//! All matches accumulate; the detector never stops at the first. Facts on
//! opposite sides of the past/current boundary are never compared.

pub mod direct;
pub mod implication;
pub mod ingredient;

use rapport_core::RelationFact;
use rapport_food::{KnowledgeBase, knowledge_base};

use crate::conflict::Conflict;

/// Compares candidate facts against existing ones.
///
/// Holds only a shared reference to an immutable knowledge base, so it is
/// `Copy`, `Send` and `Sync`, and every call is independent of the last.
#[derive(Debug, Clone, Copy)]
pub struct Detector<'kb> {
  kb: &'kb KnowledgeBase,
}

impl Default for Detector<'static> {
  fn default() -> Self { Self::new(knowledge_base()) }
}

impl<'kb> Detector<'kb> {
  pub fn new(kb: &'kb KnowledgeBase) -> Self { Self { kb } }

  pub fn knowledge_base(&self) -> &'kb KnowledgeBase { self.kb }

  /// Every conflict between `candidate` and the facts in `existing`, in
  /// existing-fact order and then rule order.
  ///
  /// A candidate with a blank label yields nothing. An existing fact with the
  /// candidate's own id is skipped, so re-validating an update does not
  /// conflict with the stored version being replaced.
  pub fn detect<'a>(
    &self,
    candidate: &RelationFact,
    existing: impl IntoIterator<Item = &'a RelationFact>,
  ) -> Vec<Conflict> {
    if candidate.is_blank() {
      return Vec::new();
    }

    let mut conflicts = Vec::new();
    for other in existing {
      if other.id == candidate.id || other.is_blank() {
        continue;
      }
      if other.effective_status() != candidate.effective_status() {
        continue;
      }
      self.compare(candidate, other, &mut conflicts);
    }
    conflicts
  }

  fn compare(
    &self,
    candidate: &RelationFact,
    other: &RelationFact,
    out: &mut Vec<Conflict>,
  ) {
    let start = out.len();
    out.extend(direct::detect(candidate, other));
    out.extend(ingredient::detect(self.kb, candidate, other));
    out.extend(implication::detect(self.kb, candidate, other));
    for conflict in &out[start..] {
      tracing::debug!(
        candidate = %candidate.id,
        existing = %other.id,
        kind = ?conflict.conflict_type,
        reasoning = %conflict.reasoning,
        "conflict detected"
      );
    }
  }
}

/// [`Detector::detect`] against the shared built-in knowledge base.
pub fn detect_conflicts<'a>(
  candidate: &RelationFact,
  existing: impl IntoIterator<Item = &'a RelationFact>,
) -> Vec<Conflict> {
  Detector::default().detect(candidate, existing)
}
