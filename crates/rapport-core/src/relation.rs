//! Relation facts: the statements the engine reasons about.
//!
//! A relation fact says something about a person ("likes ice cream", "is
//! vegan", "sensitive to potato"). The relation type is drawn from a closed
//! vocabulary; the object is free text and is only ever compared after
//! [`normalize_label`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Relation type ───────────────────────────────────────────────────────────

/// The closed vocabulary of relations a fact can express.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
  Likes,
  Dislikes,
  Is,
  SensitiveTo,
  AllergicTo,
  RegularlyDoes,
  UsedToBe,
  HasSkill,
  Fears,
  WantsToAchieve,
  CaresFor,
}

/// How a relation type participates in conflict reasoning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationRole {
  /// Eating, drinking, or enjoying the object.
  Consumption,
  Aversion,
  /// Allergy or intolerance to an ingredient.
  Sensitivity,
  /// A trait or identity, e.g. a diet the person follows.
  Identity,
  /// Something that was true of the person but no longer is.
  Former,
  Unrelated,
}

impl RelationType {
  /// The SCREAMING_SNAKE_CASE wire name, e.g. `"SENSITIVE_TO"`.
  pub fn as_str(self) -> &'static str { self.into() }

  /// Parse a relation type leniently: case-insensitive, with spaces or
  /// hyphens accepted in place of underscores.
  pub fn parse(raw: &str) -> Result<Self> {
    let wanted: String = raw
      .trim()
      .chars()
      .map(|c| match c {
        ' ' | '-' => '_',
        c => c.to_ascii_uppercase(),
      })
      .collect();
    Self::iter()
      .find(|t| t.as_str() == wanted)
      .ok_or_else(|| Error::UnknownRelationType(raw.to_string()))
  }

  /// The relation type that asserts the opposite about the same object.
  pub fn opposite(self) -> Option<Self> {
    match self {
      Self::Likes => Some(Self::Dislikes),
      Self::Dislikes => Some(Self::Likes),
      Self::Is
      | Self::SensitiveTo
      | Self::AllergicTo
      | Self::RegularlyDoes
      | Self::UsedToBe
      | Self::HasSkill
      | Self::Fears
      | Self::WantsToAchieve
      | Self::CaresFor => None,
    }
  }

  pub fn role(self) -> RelationRole {
    match self {
      Self::Likes | Self::RegularlyDoes => RelationRole::Consumption,
      Self::Dislikes => RelationRole::Aversion,
      Self::SensitiveTo | Self::AllergicTo => RelationRole::Sensitivity,
      Self::Is => RelationRole::Identity,
      Self::UsedToBe => RelationRole::Former,
      Self::HasSkill | Self::Fears | Self::WantsToAchieve | Self::CaresFor => {
        RelationRole::Unrelated
      }
    }
  }

  /// The relation as a verb phrase for user-facing text ("is sensitive to").
  pub fn verb(self) -> &'static str {
    match self {
      Self::Likes => "likes",
      Self::Dislikes => "dislikes",
      Self::Is => "is",
      Self::SensitiveTo => "is sensitive to",
      Self::AllergicTo => "is allergic to",
      Self::RegularlyDoes => "regularly does",
      Self::UsedToBe => "used to be",
      Self::HasSkill => "has the skill",
      Self::Fears => "fears",
      Self::WantsToAchieve => "wants to achieve",
      Self::CaresFor => "cares for",
    }
  }

  /// Whether the relation describes the past regardless of the status it was
  /// recorded with.
  pub fn is_inherently_past(self) -> bool { matches!(self, Self::UsedToBe) }
}

impl std::fmt::Display for RelationType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for RelationType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for RelationType {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> { Self::parse(&value) }
}

// ─── Status & provenance ─────────────────────────────────────────────────────

/// Whether a fact describes the present or the past.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RelationStatus {
  #[default]
  Current,
  Past,
}

impl std::str::FromStr for RelationStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "current" => Ok(Self::Current),
      "past" => Ok(Self::Past),
      _ => Err(Error::UnknownStatus(s.to_string())),
    }
  }
}

/// Where a fact came from. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationSource {
  #[default]
  Manual,
  AiExtraction,
  Quiz,
  Seed,
}

impl std::str::FromStr for RelationSource {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
      "manual" => Ok(Self::Manual),
      "ai_extraction" | "ai" => Ok(Self::AiExtraction),
      "quiz" => Ok(Self::Quiz),
      "seed" => Ok(Self::Seed),
      _ => Err(Error::UnknownSource(s.to_string())),
    }
  }
}

// ─── Descriptive metadata ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
  Weak,
  Moderate,
  Strong,
}

/// How sure the author is about a fact, clamped to `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
  pub const CERTAIN: Self = Self(1.0);

  pub fn new(value: f64) -> Self {
    if value.is_nan() {
      Self(0.0)
    } else {
      Self(value.clamp(0.0, 1.0))
    }
  }

  pub fn value(self) -> f64 { self.0 }
}

impl Default for Confidence {
  fn default() -> Self { Self::CERTAIN }
}

impl From<f64> for Confidence {
  fn from(value: f64) -> Self { Self::new(value) }
}

impl From<Confidence> for f64 {
  fn from(c: Confidence) -> Self { c.0 }
}

// ─── Relation fact ───────────────────────────────────────────────────────────

/// A statement about a person.
///
/// The conflict engine only reads facts; it never mutates one. Fields that
/// are absent from JSON input take their defaults, and a missing `id` is
/// generated so that a freshly proposed candidate can be deserialised
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationFact {
  #[serde(default = "Uuid::new_v4")]
  pub id:             Uuid,
  pub subject_id:     Uuid,
  pub relation_type:  RelationType,
  #[serde(default)]
  pub object_label:   String,
  #[serde(default)]
  pub category:       Option<String>,
  #[serde(default)]
  pub intensity:      Option<Intensity>,
  #[serde(default)]
  pub confidence:     Confidence,
  #[serde(default)]
  pub status:         RelationStatus,
  #[serde(default)]
  pub source:         RelationSource,
  #[serde(default)]
  pub recorded_at:    Option<DateTime<Utc>>,
}

impl RelationFact {
  /// Convenience constructor with all optional fields set to their defaults.
  pub fn new(
    subject_id: Uuid,
    relation_type: RelationType,
    object_label: impl Into<String>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      subject_id,
      relation_type,
      object_label: object_label.into(),
      category: None,
      intensity: None,
      confidence: Confidence::default(),
      status: RelationStatus::default(),
      source: RelationSource::default(),
      recorded_at: None,
    }
  }

  pub fn with_status(mut self, status: RelationStatus) -> Self {
    self.status = status;
    self
  }

  pub fn with_source(mut self, source: RelationSource) -> Self {
    self.source = source;
    self
  }

  /// The status used for temporal reasoning. `USED_TO_BE` facts are past
  /// even when recorded as current.
  pub fn effective_status(&self) -> RelationStatus {
    if self.relation_type.is_inherently_past() {
      RelationStatus::Past
    } else {
      self.status
    }
  }

  pub fn normalized_label(&self) -> String {
    normalize_label(&self.object_label)
  }

  /// True when the label is empty after trimming.
  pub fn is_blank(&self) -> bool { self.object_label.trim().is_empty() }

  /// The fact as a short phrase, e.g. `likes "ice cream"`.
  pub fn describe(&self) -> String {
    format!("{} \"{}\"", self.relation_type.verb(), self.object_label.trim())
  }

  pub fn from_json(json: &str) -> Result<Self> {
    Ok(serde_json::from_str(json)?)
  }
}

/// Lowercase, trim, and collapse internal whitespace.
pub fn normalize_label(label: &str) -> String {
  label
    .split_whitespace()
    .map(str::to_lowercase)
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_relation_type_is_lenient() {
    assert_eq!(RelationType::parse("LIKES").unwrap(), RelationType::Likes);
    assert_eq!(
      RelationType::parse(" sensitive to ").unwrap(),
      RelationType::SensitiveTo
    );
    assert_eq!(
      RelationType::parse("used-to-be").unwrap(),
      RelationType::UsedToBe
    );
    assert!(matches!(
      RelationType::parse("LOVES"),
      Err(Error::UnknownRelationType(_))
    ));
  }

  #[test]
  fn every_type_round_trips_through_its_name() {
    for t in RelationType::iter() {
      assert_eq!(RelationType::parse(t.as_str()).unwrap(), t);
    }
  }

  #[test]
  fn opposition_is_symmetric() {
    for t in RelationType::iter() {
      if let Some(o) = t.opposite() {
        assert_eq!(o.opposite(), Some(t));
      }
    }
  }

  #[test]
  fn used_to_be_is_always_past() {
    let fact =
      RelationFact::new(Uuid::new_v4(), RelationType::UsedToBe, "meat-eater");
    assert_eq!(fact.status, RelationStatus::Current);
    assert_eq!(fact.effective_status(), RelationStatus::Past);

    let likes = RelationFact::new(Uuid::new_v4(), RelationType::Likes, "tea");
    assert_eq!(likes.effective_status(), RelationStatus::Current);
    assert_eq!(
      likes.with_status(RelationStatus::Past).effective_status(),
      RelationStatus::Past
    );
  }

  #[test]
  fn normalize_label_collapses_case_and_whitespace() {
    assert_eq!(normalize_label("  Ice   CREAM \t"), "ice cream");
    assert_eq!(normalize_label("   "), "");
  }

  #[test]
  fn describe_uses_verb_phrase() {
    let fact =
      RelationFact::new(Uuid::new_v4(), RelationType::SensitiveTo, " potato ");
    assert_eq!(fact.describe(), r#"is sensitive to "potato""#);
  }

  #[test]
  fn confidence_is_clamped() {
    assert_eq!(Confidence::new(1.7).value(), 1.0);
    assert_eq!(Confidence::new(-0.2).value(), 0.0);
    assert_eq!(Confidence::new(f64::NAN).value(), 0.0);
    assert_eq!(Confidence::new(0.4).value(), 0.4);
  }

  #[test]
  fn deserialises_minimal_candidate() {
    let subject = Uuid::new_v4();
    let json = format!(
      r#"{{"subject_id":"{subject}","relation_type":"regularly does",
        "object_label":"drinks milk","confidence":0.7,
        "source":"ai_extraction"}}"#
    );
    let fact = RelationFact::from_json(&json).unwrap();
    assert_eq!(fact.subject_id, subject);
    assert_eq!(fact.relation_type, RelationType::RegularlyDoes);
    assert_eq!(fact.status, RelationStatus::Current);
    assert_eq!(fact.source, RelationSource::AiExtraction);
    assert_eq!(fact.confidence.value(), 0.7);
  }

  #[test]
  fn serialises_type_in_screaming_snake_case() {
    let fact =
      RelationFact::new(Uuid::new_v4(), RelationType::SensitiveTo, "potato");
    let value = serde_json::to_value(&fact).unwrap();
    assert_eq!(value["relation_type"], "SENSITIVE_TO");
    assert_eq!(value["status"], "current");
  }
}
