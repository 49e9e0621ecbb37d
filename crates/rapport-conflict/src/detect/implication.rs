//! A consumed food violates a diet the person follows.

use rapport_core::{RelationFact, RelationRole};
use rapport_food::KnowledgeBase;

use crate::conflict::{Conflict, ConflictType};

/// "is vegan" against "likes cheese", in either order. An `IS` label that
/// names no known restriction ("is a nurse") never conflicts.
pub fn detect(
  kb: &KnowledgeBase,
  candidate: &RelationFact,
  existing: &RelationFact,
) -> Option<Conflict> {
  let (identity, food) = match (
    candidate.relation_type.role(),
    existing.relation_type.role(),
  ) {
    (RelationRole::Identity, RelationRole::Consumption) => {
      (candidate, existing)
    }
    (RelationRole::Consumption, RelationRole::Identity) => {
      (existing, candidate)
    }
    _ => return None,
  };

  let rule = kb.restriction(&identity.object_label)?;
  let compat = kb.compatibility(&food.object_label, rule);
  if compat.compatible {
    return None;
  }

  let violating = compat.violating_ingredients.join(", ");
  Some(Conflict::new(
    ConflictType::LogicalImplication,
    format!(
      "{} is incompatible with being {} (contains {violating})",
      food.describe(),
      rule.name
    ),
    format!(
      "{} contains {violating}; {} forbids it",
      food.normalized_label(),
      rule.name
    ),
    Some(existing.id),
  ))
}
