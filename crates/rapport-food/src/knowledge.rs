//! The knowledge base and its builder.
//!
//! A [`KnowledgeBase`] is immutable once built. It owns three tables: the
//! ingredient vocabulary (with implication closure), a phrase index from food
//! names and ingredient names to ingredient tags, and the dietary
//! restrictions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  phrase::{PhraseIndex, PhraseMatch, phrase_key, tokenize},
  tables,
};

/// Tokens that negate a restriction named right after them ("not vegan").
const NEGATIONS: &[&str] = &["not", "non", "no longer", "ex"];

/// Qualifiers that mean a food phrase right after them is a substitute
/// ("vegan burgers", "gluten free bread", "rice flour pancakes").
const FREE_FROM_PREFIXES: &[&str] = &[
  "no",
  "non",
  "vegan",
  "plant based",
  "meatless",
  "dairy free",
  "lactose free",
  "gluten free",
  "egg free",
  "nut free",
  "rice flour",
  "almond flour",
  "coconut flour",
  "oat flour",
  "corn flour",
  "chickpea flour",
];

/// Tokens that strip the ingredient named right before them ("sugar free").
const FREE_FROM_SUFFIXES: &[&str] = &["free", "less"];

// ─── Definitions ─────────────────────────────────────────────────────────────

/// An ingredient tag and the broader tags it implies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientDef {
  pub tag:     String,
  #[serde(default)]
  pub aliases: Vec<String>,
  #[serde(default)]
  pub implies: Vec<String>,
}

/// A food or dish, the phrasings it is known by, and its ingredient tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodDef {
  pub name:        String,
  #[serde(default)]
  pub aliases:     Vec<String>,
  pub ingredients: Vec<String>,
}

/// A dietary restriction and the ingredient tags it forbids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionDef {
  pub name:    String,
  #[serde(default)]
  pub aliases: Vec<String>,
  pub forbids: Vec<String>,
}

// ─── Query results ───────────────────────────────────────────────────────────

/// A compiled dietary restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DietRestriction {
  pub name:    String,
  pub forbids: BTreeSet<String>,
}

/// Result of [`KnowledgeBase::is_food_compatible_with_restriction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compatibility {
  pub compatible:            bool,
  /// Forbidden tags present in the food, sorted. Empty when compatible.
  pub violating_ingredients: Vec<String>,
}

impl Compatibility {
  fn compatible() -> Self {
    Self {
      compatible:            true,
      violating_ingredients: Vec::new(),
    }
  }
}

/// One entry returned by [`KnowledgeBase::find_conflicting_foods`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodConflict {
  pub food:   String,
  pub reason: String,
}

/// How [`KnowledgeBase::find_conflicting_foods`] interpreted its constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint<'a> {
  Restriction(&'a DietRestriction),
  Ingredient,
}

// ─── Knowledge base ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
  /// Canonical tag → the tag plus everything it implies.
  closure:      BTreeMap<String, BTreeSet<String>>,
  /// Ingredient names and aliases → canonical tag.
  ingredients:  PhraseIndex<String>,
  /// Food and ingredient phrases → implication-closed tag set.
  foods:        PhraseIndex<BTreeSet<String>>,
  restrictions: Vec<DietRestriction>,
  /// Restriction names and aliases → index into `restrictions`.
  diet_names:   PhraseIndex<usize>,
}

impl KnowledgeBase {
  /// The built-in tables with no extensions.
  pub fn builtin() -> Self { Self::compile(KnowledgeBaseBuilder::default()) }

  /// A builder preloaded with the built-in tables.
  pub fn builder() -> KnowledgeBaseBuilder { KnowledgeBaseBuilder::default() }

  /// A builder with no tables at all.
  pub fn empty_builder() -> KnowledgeBaseBuilder {
    KnowledgeBaseBuilder {
      ingredients:  Vec::new(),
      foods:        Vec::new(),
      restrictions: Vec::new(),
    }
  }

  fn compile(builder: KnowledgeBaseBuilder) -> Self {
    // Merge ingredient rows sharing a tag.
    let mut implies: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut ingredients = PhraseIndex::default();
    for def in &builder.ingredients {
      let tag = phrase_key(&def.tag);
      if tag.is_empty() {
        continue;
      }
      implies
        .entry(tag.clone())
        .or_default()
        .extend(def.implies.iter().map(|t| phrase_key(t)));
      for phrase in std::iter::once(&def.tag).chain(&def.aliases) {
        ingredients.insert(phrase, tag.clone());
      }
    }

    // Tags only mentioned as parents, or only by food and restriction rows,
    // still belong to the vocabulary.
    let referenced: Vec<String> = implies
      .values()
      .flatten()
      .cloned()
      .chain(
        builder
          .foods
          .iter()
          .flat_map(|d| &d.ingredients)
          .chain(builder.restrictions.iter().flat_map(|d| &d.forbids))
          .map(|t| phrase_key(t)),
      )
      .filter(|t| !t.is_empty())
      .collect();
    for tag in referenced {
      if !implies.contains_key(&tag) {
        ingredients.insert(&tag, tag.clone());
        implies.insert(tag, BTreeSet::new());
      }
    }

    let closure: BTreeMap<String, BTreeSet<String>> = implies
      .keys()
      .map(|tag| (tag.clone(), close_over(tag, &implies)))
      .collect();

    // Food phrases. Ingredient names are foods in their own right ("drinks
    // milk"); dish rows sharing a phrase are unioned.
    let mut food_tags: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for def in &builder.ingredients {
      let tag = phrase_key(&def.tag);
      let Some(tags) = closure.get(&tag) else { continue };
      for phrase in std::iter::once(&def.tag).chain(&def.aliases) {
        food_tags
          .entry(phrase_key(phrase))
          .or_default()
          .extend(tags.iter().cloned());
      }
    }
    for def in &builder.foods {
      let tags: BTreeSet<String> = def
        .ingredients
        .iter()
        .flat_map(|t| expand(&phrase_key(t), &closure))
        .collect();
      for phrase in std::iter::once(&def.name).chain(&def.aliases) {
        food_tags
          .entry(phrase_key(phrase))
          .or_default()
          .extend(tags.iter().cloned());
      }
    }
    let foods: PhraseIndex<BTreeSet<String>> = food_tags.into_iter().collect();

    // Restrictions; a later row with the same name replaces the earlier one.
    let mut restrictions: Vec<DietRestriction> = Vec::new();
    let mut diet_names = PhraseIndex::default();
    for def in &builder.restrictions {
      let name = phrase_key(&def.name);
      if name.is_empty() {
        continue;
      }
      let forbids: BTreeSet<String> =
        def.forbids.iter().map(|t| phrase_key(t)).collect();
      let index = match restrictions.iter().position(|r| r.name == name) {
        Some(i) => {
          restrictions[i].forbids = forbids;
          i
        }
        None => {
          restrictions.push(DietRestriction {
            name: name.clone(),
            forbids,
          });
          restrictions.len() - 1
        }
      };
      for phrase in std::iter::once(&def.name).chain(&def.aliases) {
        diet_names.insert(phrase, index);
      }
    }

    tracing::debug!(
      ingredients = closure.len(),
      food_phrases = foods.len(),
      restrictions = restrictions.len(),
      "compiled food knowledge base"
    );

    Self {
      closure,
      ingredients,
      foods,
      restrictions,
      diet_names,
    }
  }

  // ── Vocabulary ────────────────────────────────────────────────────────

  /// The canonical tag for an ingredient name or alias, if known.
  pub fn canonical_ingredient(&self, name: &str) -> Option<&str> {
    self.ingredients.get(name).map(String::as_str)
  }

  /// Whether `tag` is part of the ingredient vocabulary.
  pub fn is_known_ingredient(&self, tag: &str) -> bool {
    self.canonical_ingredient(tag).is_some()
      || self.closure.contains_key(&phrase_key(tag))
  }

  /// Resolve the ingredient tags named by a sensitivity label.
  ///
  /// An exact name or alias resolves to its canonical tag. Otherwise every
  /// ingredient phrase inside the label is used ("shellfish allergy",
  /// "peanuts and sesame"). A label naming no known ingredient resolves to
  /// nothing.
  pub fn resolve_ingredients(&self, label: &str) -> Vec<String> {
    if let Some(tag) = self.canonical_ingredient(label) {
      return vec![tag.to_string()];
    }
    let mut tags: Vec<String> = Vec::new();
    for m in self.ingredients.scan(&tokenize(label)) {
      if !tags.contains(m.value) {
        tags.push(m.value.clone());
      }
    }
    tags
  }

  /// The implication-closed ingredient tags of every food phrase in
  /// `food_text`. Unknown foods yield an empty set.
  ///
  /// A phrase qualified as free-from ("lactose-free milk", "sugar free",
  /// "vegan burgers") contributes nothing.
  pub fn ingredients_of(&self, food_text: &str) -> BTreeSet<String> {
    let tokens = tokenize(food_text);
    self
      .foods
      .scan(&tokens)
      .into_iter()
      .filter(|m| !is_free_from(&tokens, m))
      .flat_map(|m| m.value.iter().cloned())
      .collect()
  }

  /// Look up a restriction by name, alias, or a label that mentions one
  /// ("a strict vegan"). A mention preceded by a negation does not count.
  pub fn restriction(&self, name: &str) -> Option<&DietRestriction> {
    if let Some(&i) = self.diet_names.get(name) {
      return self.restrictions.get(i);
    }
    let tokens = tokenize(name);
    self
      .diet_names
      .scan(&tokens)
      .into_iter()
      .find(|m| !preceded_by(&tokens, m.start, NEGATIONS))
      .and_then(|m| self.restrictions.get(*m.value))
  }

  pub fn restrictions(&self) -> &[DietRestriction] { &self.restrictions }

  // ── Queries ───────────────────────────────────────────────────────────

  /// Whether `food_text` contains `ingredient`, directly or through a known
  /// dish or derivative phrasing.
  pub fn food_contains_ingredient(
    &self,
    food_text: &str,
    ingredient: &str,
  ) -> bool {
    let tags = self.ingredients_of(food_text);
    self
      .resolve_ingredients(ingredient)
      .iter()
      .any(|tag| tags.contains(tag))
  }

  /// Check `food_text` against a named restriction. Unknown restrictions and
  /// unknown foods are compatible.
  pub fn is_food_compatible_with_restriction(
    &self,
    food_text: &str,
    restriction: &str,
  ) -> Compatibility {
    match self.restriction(restriction) {
      Some(rule) => self.compatibility(food_text, rule),
      None => Compatibility::compatible(),
    }
  }

  pub fn compatibility(
    &self,
    food_text: &str,
    rule: &DietRestriction,
  ) -> Compatibility {
    let tags = self.ingredients_of(food_text);
    let violating: Vec<String> =
      tags.intersection(&rule.forbids).cloned().collect();
    Compatibility {
      compatible:            violating.is_empty(),
      violating_ingredients: violating,
    }
  }

  /// Decide whether `constraint` names a restriction or an ingredient.
  pub fn classify_constraint(&self, constraint: &str) -> Constraint<'_> {
    match self.restriction(constraint) {
      Some(rule) => Constraint::Restriction(rule),
      None => Constraint::Ingredient,
    }
  }

  /// Return every food in `candidate_foods` that conflicts with
  /// `constraint`, in input order.
  pub fn find_conflicting_foods<S: AsRef<str>>(
    &self,
    constraint: &str,
    candidate_foods: &[S],
  ) -> Vec<FoodConflict> {
    match self.classify_constraint(constraint) {
      Constraint::Restriction(rule) => candidate_foods
        .iter()
        .filter_map(|food| {
          let food = food.as_ref();
          let compat = self.compatibility(food, rule);
          (!compat.compatible).then(|| FoodConflict {
            food:   food.to_string(),
            reason: format!(
              "not {}: contains {}",
              rule.name,
              compat.violating_ingredients.join(", ")
            ),
          })
        })
        .collect(),
      Constraint::Ingredient => {
        let tags = self.resolve_ingredients(constraint);
        candidate_foods
          .iter()
          .filter_map(|food| {
            let food = food.as_ref();
            let hits: Vec<&str> = tags
              .iter()
              .filter(|tag| self.food_contains_ingredient(food, tag))
              .map(String::as_str)
              .collect();
            (!hits.is_empty()).then(|| FoodConflict {
              food:   food.to_string(),
              reason: format!("contains {}", hits.join(", ")),
            })
          })
          .collect()
      }
    }
  }
}

impl Default for KnowledgeBase {
  fn default() -> Self { Self::builtin() }
}

fn close_over(
  tag: &str,
  implies: &BTreeMap<String, BTreeSet<String>>,
) -> BTreeSet<String> {
  let mut seen = BTreeSet::new();
  let mut stack = vec![tag.to_string()];
  while let Some(next) = stack.pop() {
    if !seen.insert(next.clone()) {
      continue;
    }
    if let Some(parents) = implies.get(&next) {
      stack.extend(parents.iter().cloned());
    }
  }
  seen
}

fn expand(
  tag: &str,
  closure: &BTreeMap<String, BTreeSet<String>>,
) -> BTreeSet<String> {
  closure
    .get(tag)
    .cloned()
    .unwrap_or_else(|| BTreeSet::from([tag.to_string()]))
}

/// Whether one of `words` ends right before `tokens[start]`.
fn preceded_by(tokens: &[String], start: usize, words: &[&str]) -> bool {
  words.iter().any(|word| {
    let word = tokenize(word);
    start >= word.len() && tokens[start - word.len()..start] == word[..]
  })
}

fn is_free_from<V>(tokens: &[String], m: &PhraseMatch<'_, V>) -> bool {
  let next = tokens.get(m.start + m.len).map(String::as_str);
  next.is_some_and(|t| FREE_FROM_SUFFIXES.contains(&t))
    || preceded_by(tokens, m.start, FREE_FROM_PREFIXES)
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Layers extension rows over the built-in tables.
#[derive(Debug, Clone)]
pub struct KnowledgeBaseBuilder {
  ingredients:  Vec<IngredientDef>,
  foods:        Vec<FoodDef>,
  restrictions: Vec<RestrictionDef>,
}

impl Default for KnowledgeBaseBuilder {
  fn default() -> Self {
    let owned = |xs: &[&str]| -> Vec<String> {
      xs.iter().map(|s| s.to_string()).collect()
    };
    Self {
      ingredients:  tables::INGREDIENTS
        .iter()
        .map(|r| IngredientDef {
          tag:     r.tag.to_string(),
          aliases: owned(r.aliases),
          implies: owned(r.implies),
        })
        .collect(),
      foods:        tables::FOODS
        .iter()
        .map(|r| FoodDef {
          name:        r.name.to_string(),
          aliases:     owned(r.aliases),
          ingredients: owned(r.ingredients),
        })
        .collect(),
      restrictions: tables::RESTRICTIONS
        .iter()
        .map(|r| RestrictionDef {
          name:    r.name.to_string(),
          aliases: owned(r.aliases),
          forbids: owned(r.forbids),
        })
        .collect(),
    }
  }
}

impl KnowledgeBaseBuilder {
  pub fn ingredient(mut self, def: IngredientDef) -> Self {
    self.ingredients.push(def);
    self
  }

  pub fn food(mut self, def: FoodDef) -> Self {
    self.foods.push(def);
    self
  }

  pub fn restriction(mut self, def: RestrictionDef) -> Self {
    self.restrictions.push(def);
    self
  }

  pub fn ingredients(
    self,
    defs: impl IntoIterator<Item = IngredientDef>,
  ) -> Self {
    defs.into_iter().fold(self, Self::ingredient)
  }

  pub fn foods(self, defs: impl IntoIterator<Item = FoodDef>) -> Self {
    defs.into_iter().fold(self, Self::food)
  }

  pub fn restrictions(
    self,
    defs: impl IntoIterator<Item = RestrictionDef>,
  ) -> Self {
    defs.into_iter().fold(self, Self::restriction)
  }

  /// Validate every row and compile the knowledge base.
  pub fn build(self) -> Result<KnowledgeBase> {
    for def in &self.ingredients {
      if phrase_key(&def.tag).is_empty() {
        return Err(Error::EmptyName { kind: "ingredient" });
      }
    }
    for def in &self.foods {
      if phrase_key(&def.name).is_empty() {
        return Err(Error::EmptyName { kind: "food" });
      }
    }
    for def in &self.restrictions {
      if phrase_key(&def.name).is_empty() {
        return Err(Error::EmptyName { kind: "restriction" });
      }
      if def.forbids.iter().all(|t| phrase_key(t).is_empty()) {
        return Err(Error::EmptyRestriction(def.name.clone()));
      }
    }

    let known: BTreeSet<String> = self
      .ingredients
      .iter()
      .flat_map(|d| std::iter::once(&d.tag).chain(&d.implies))
      .map(|t| phrase_key(t))
      .collect();
    let referenced = self
      .foods
      .iter()
      .flat_map(|d| &d.ingredients)
      .chain(self.restrictions.iter().flat_map(|d| &d.forbids));
    for tag in referenced {
      let key = phrase_key(tag);
      if !key.is_empty() && !known.contains(&key) {
        tracing::warn!(tag = %key, "unknown ingredient tag; adding it");
      }
    }

    Ok(KnowledgeBase::compile(self))
  }
}
