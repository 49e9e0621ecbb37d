//! A consumed food contains an ingredient the person is sensitive to.

use rapport_core::{RelationFact, RelationRole};
use rapport_food::KnowledgeBase;

use crate::conflict::{Conflict, ConflictType};

/// Checked in both directions: a new sensitivity against a food already
/// liked, and a new food against a sensitivity already recorded.
///
/// One conflict is produced per sensitised ingredient the food contains, so a
/// label naming several ingredients ("peanuts and sesame") can yield several.
pub fn detect(
  kb: &KnowledgeBase,
  candidate: &RelationFact,
  existing: &RelationFact,
) -> Vec<Conflict> {
  let (food, sensitivity) = match (
    candidate.relation_type.role(),
    existing.relation_type.role(),
  ) {
    (RelationRole::Sensitivity, RelationRole::Consumption) => {
      (existing, candidate)
    }
    (RelationRole::Consumption, RelationRole::Sensitivity) => {
      (candidate, existing)
    }
    _ => return Vec::new(),
  };

  let food_label = food.object_label.trim();
  kb.resolve_ingredients(&sensitivity.object_label)
    .into_iter()
    .filter(|tag| kb.food_contains_ingredient(food_label, tag))
    .map(|tag| {
      Conflict::new(
        ConflictType::IngredientConflict,
        format!(
          "\"{food_label}\" contains {tag}, but this person {}",
          sensitivity.describe()
        ),
        format!("{} contains {tag}", food.normalized_label()),
        Some(existing.id),
      )
    })
    .collect()
}
