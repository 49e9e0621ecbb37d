//! Food knowledge base for the Rapport conflict engine.
//!
//! Static reference data mapping foods and dishes to ingredient tags, and
//! dietary restrictions to the tags they forbid. Lookups are pure and never
//! fail: unknown foods and restrictions simply match nothing.
//!
//! The built-in tables are compiled once per process into [`knowledge_base`].
//! The free functions in this module query that shared instance; build a
//! custom [`KnowledgeBase`] with [`KnowledgeBase::builder`] to layer extra
//! foods or restrictions on top.

use std::sync::LazyLock;

mod knowledge;
mod tables;

pub mod error;
pub mod phrase;

pub use error::{Error, Result};
pub use knowledge::{
  Compatibility, Constraint, DietRestriction, FoodConflict, FoodDef,
  IngredientDef, KnowledgeBase, KnowledgeBaseBuilder, RestrictionDef,
};

static KNOWLEDGE_BASE: LazyLock<KnowledgeBase> =
  LazyLock::new(KnowledgeBase::builtin);

/// The process-wide knowledge base built from the built-in tables.
pub fn knowledge_base() -> &'static KnowledgeBase { &KNOWLEDGE_BASE }

/// See [`KnowledgeBase::food_contains_ingredient`].
pub fn food_contains_ingredient(food_text: &str, ingredient: &str) -> bool {
  knowledge_base().food_contains_ingredient(food_text, ingredient)
}

/// See [`KnowledgeBase::is_food_compatible_with_restriction`].
pub fn is_food_compatible_with_restriction(
  food_text: &str,
  restriction: &str,
) -> Compatibility {
  knowledge_base().is_food_compatible_with_restriction(food_text, restriction)
}

/// See [`KnowledgeBase::find_conflicting_foods`].
pub fn find_conflicting_foods<S: AsRef<str>>(
  constraint: &str,
  candidate_foods: &[S],
) -> Vec<FoodConflict> {
  knowledge_base().find_conflicting_foods(constraint, candidate_foods)
}
