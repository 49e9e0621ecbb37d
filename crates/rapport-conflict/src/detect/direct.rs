//! Opposing relation types about the same object.

use rapport_core::RelationFact;

use crate::conflict::{Conflict, ConflictType};

/// "likes X" against "dislikes X", with labels compared after
/// normalisation.
pub fn detect(
  candidate: &RelationFact,
  existing: &RelationFact,
) -> Option<Conflict> {
  if candidate.relation_type.opposite() != Some(existing.relation_type) {
    return None;
  }
  if candidate.normalized_label() != existing.normalized_label() {
    return None;
  }

  Some(Conflict::new(
    ConflictType::DirectContradiction,
    format!(
      "{} contradicts existing fact: {}",
      candidate.describe(),
      existing.describe()
    ),
    format!(
      "{} is the opposite of {}",
      candidate.relation_type, existing.relation_type
    ),
    Some(existing.id),
  ))
}
