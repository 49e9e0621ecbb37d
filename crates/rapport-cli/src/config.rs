//! Configuration for the `rapport` binary.
//!
//! Read from an optional TOML file layered under `RAPPORT_*` environment
//! variables. Besides the output format, the file may extend the built-in
//! food knowledge base:
//!
//! ```toml
//! format = "json"
//!
//! [[foods]]
//! name = "tiramisu"
//! ingredients = ["cheese", "egg", "caffeine"]
//!
//! [[restrictions]]
//! name = "low fodmap"
//! forbids = ["garlic", "onion", "wheat"]
//! ```

use std::path::Path;

use anyhow::Context as _;
use clap::ValueEnum;
use rapport_food::{FoodDef, IngredientDef, KnowledgeBase, RestrictionDef};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  #[serde(default)]
  pub format:       OutputFormat,
  #[serde(default)]
  pub ingredients:  Vec<IngredientDef>,
  #[serde(default)]
  pub foods:        Vec<FoodDef>,
  #[serde(default)]
  pub restrictions: Vec<RestrictionDef>,
}

impl AppConfig {
  /// Load from `path` (which need not exist) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let builder = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("RAPPORT"));
    Self::from_builder(builder)
  }

  fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
  ) -> anyhow::Result<Self> {
    builder
      .build()
      .context("failed to read config")?
      .try_deserialize()
      .context("failed to deserialise AppConfig")
  }

  pub fn has_extensions(&self) -> bool {
    !(self.ingredients.is_empty()
      && self.foods.is_empty()
      && self.restrictions.is_empty())
  }

  /// The built-in knowledge base with this config's extensions applied.
  pub fn knowledge_base(&self) -> rapport_food::Result<KnowledgeBase> {
    KnowledgeBase::builder()
      .ingredients(self.ingredients.iter().cloned())
      .foods(self.foods.iter().cloned())
      .restrictions(self.restrictions.iter().cloned())
      .build()
  }
}
