//! `rapport`: check proposed relation facts from the command line.
//!
//! # Usage
//!
//! ```
//! rapport check quiz-answers.json
//! rapport contains "hash browns" potato
//! rapport compatible cheese vegan
//! rapport conflicts "lactose intolerant" pizza tofu "ice cream"
//! ```
//!
//! `check` reads `{"existing": [...], "candidates": [...]}` (or `-` for
//! stdin), validates every candidate in order and exits with status 2 when
//! any candidate is rejected.

mod config;
mod output;

use std::{
  io::Read as _,
  path::{Path, PathBuf},
  process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use config::{AppConfig, OutputFormat};
use rapport_conflict::{BatchSummary, Validator};
use rapport_core::RelationFact;
use rapport_food::KnowledgeBase;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Relation-fact conflict checker")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "rapport.toml")]
  config: PathBuf,

  /// Output format; overrides the config file.
  #[arg(long, value_enum)]
  format: Option<OutputFormat>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Validate a batch of candidate facts read from a JSON file.
  Check {
    /// JSON document with `existing` and `candidates` arrays, or `-`.
    file: PathBuf,
  },
  /// Report whether a food contains an ingredient.
  Contains { food: String, ingredient: String },
  /// Report whether a food is compatible with a dietary restriction.
  Compatible { food: String, restriction: String },
  /// List the foods that conflict with a restriction or ingredient.
  Conflicts {
    constraint: String,
    #[arg(required = true)]
    foods:      Vec<String>,
  },
}

/// Input document for `rapport check`.
#[derive(Deserialize)]
struct CheckInput {
  #[serde(default)]
  existing:   Vec<RelationFact>,
  candidates: Vec<RelationFact>,
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let app_cfg = AppConfig::load(&cli.config)
    .with_context(|| format!("failed to load {}", cli.config.display()))?;
  let format = cli.format.unwrap_or(app_cfg.format);

  let kb = if app_cfg.has_extensions() {
    app_cfg
      .knowledge_base()
      .context("invalid knowledge base extension")?
  } else {
    KnowledgeBase::builtin()
  };

  match cli.command {
    Command::Check { file } => check(&kb, &file, format),
    Command::Contains { food, ingredient } => {
      let contains = kb.food_contains_ingredient(&food, &ingredient);
      match format {
        OutputFormat::Json => print_json(&serde_json::json!({
          "food": food,
          "ingredient": ingredient,
          "contains": contains,
        }))?,
        OutputFormat::Text => println!("{contains}"),
      }
      Ok(ExitCode::SUCCESS)
    }
    Command::Compatible { food, restriction } => {
      let compat = kb.is_food_compatible_with_restriction(&food, &restriction);
      match format {
        OutputFormat::Json => print_json(&compat)?,
        OutputFormat::Text => {
          println!("{}", output::compatibility(&food, &restriction, &compat))
        }
      }
      Ok(ExitCode::SUCCESS)
    }
    Command::Conflicts { constraint, foods } => {
      let hits = kb.find_conflicting_foods(&constraint, &foods);
      match format {
        OutputFormat::Json => print_json(&hits)?,
        OutputFormat::Text => {
          print!("{}", output::food_conflicts(&constraint, &hits))
        }
      }
      Ok(ExitCode::SUCCESS)
    }
  }
}

fn check(
  kb: &KnowledgeBase,
  file: &Path,
  format: OutputFormat,
) -> anyhow::Result<ExitCode> {
  let raw = read_input(file)?;
  let input: CheckInput = serde_json::from_str(&raw)
    .with_context(|| format!("failed to parse {}", file.display()))?;

  tracing::info!(
    existing = input.existing.len(),
    candidates = input.candidates.len(),
    "checking batch"
  );

  let report =
    Validator::new(kb).validate_batch(&input.candidates, &input.existing);
  match format {
    OutputFormat::Json => print_json(&report)?,
    OutputFormat::Text => {
      print!("{}", output::batch(&report, &input.candidates))
    }
  }

  Ok(ExitCode::from(exit_status(&report.summary)))
}

/// 2 when any candidate failed, else 0.
fn exit_status(summary: &BatchSummary) -> u8 {
  if summary.failed > 0 { 2 } else { 0 }
}

/// Read a file, or stdin when `path` is `-`.
fn read_input(path: &Path) -> anyhow::Result<String> {
  if path == Path::new("-") {
    let mut buf = String::new();
    std::io::stdin()
      .read_to_string(&mut buf)
      .context("failed to read stdin")?;
    return Ok(buf);
  }
  std::fs::read_to_string(path)
    .with_context(|| format!("failed to read {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

#[cfg(test)]
mod tests {
  use rapport_conflict::{Disposition, validate_batch};
  use rapport_core::RelationType;
  use uuid::Uuid;

  use super::*;

  #[test]
  fn rejected_candidate_exits_with_two() {
    let s = Uuid::new_v4();
    let existing = vec![RelationFact::new(s, RelationType::Dislikes, "tea")];
    let candidates = vec![RelationFact::new(s, RelationType::Likes, "tea")];
    let report = validate_batch(&candidates, &existing);
    assert_eq!(report.outcomes[0].disposition, Disposition::Reject);
    assert_eq!(exit_status(&report.summary), 2);
  }

  #[test]
  fn clean_and_review_batches_exit_with_zero() {
    let mut summary = BatchSummary::default();
    summary.record(Disposition::Save);
    summary.record(Disposition::SaveForReview);
    assert_eq!(exit_status(&summary), 0);
  }

  #[test]
  fn check_input_defaults_existing_to_empty() {
    let subject = Uuid::new_v4();
    let raw = format!(
      r#"{{"candidates":[{{"subject_id":"{subject}",
        "relation_type":"LIKES","object_label":"hiking"}}]}}"#
    );
    let input: CheckInput = serde_json::from_str(&raw).unwrap();
    assert!(input.existing.is_empty());
    assert_eq!(input.candidates.len(), 1);
    assert_eq!(input.candidates[0].subject_id, subject);
  }

  #[test]
  fn check_input_requires_candidates() {
    assert!(serde_json::from_str::<CheckInput>(r#"{"existing":[]}"#).is_err());
  }

  #[test]
  fn read_input_reads_a_file() {
    let path = std::env::temp_dir()
      .join(format!("rapport-check-{}.json", Uuid::new_v4()));
    std::fs::write(&path, r#"{"candidates":[]}"#).unwrap();
    let raw = read_input(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(raw, r#"{"candidates":[]}"#);
  }

  #[test]
  fn read_input_reports_missing_file() {
    let err = read_input(Path::new("/nonexistent/rapport.json")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/rapport.json"));
  }
}
