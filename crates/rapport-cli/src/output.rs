//! Plain-text rendering for command results. JSON output goes through serde
//! directly.

use rapport_conflict::{BatchReport, Disposition};
use rapport_core::RelationFact;
use rapport_food::{Compatibility, FoodConflict};

pub fn batch(report: &BatchReport, candidates: &[RelationFact]) -> String {
  let mut out = String::new();
  for (outcome, candidate) in report.outcomes.iter().zip(candidates) {
    let tag = match outcome.disposition {
      Disposition::Save => "save",
      Disposition::SaveForReview => "review",
      Disposition::Reject => "reject",
    };
    out.push_str(&format!(
      "{tag:<7} {}  {}\n",
      outcome.subject_id,
      candidate.describe()
    ));
    if let Some(error) = &outcome.error {
      out.push_str(&format!("        error: {error}\n"));
    }
    for conflict in outcome.validation.iter().flat_map(|v| &v.conflicts) {
      out.push_str(&format!(
        "        {}: {} ({})\n",
        conflict.severity, conflict.description, conflict.reasoning
      ));
    }
  }
  let summary = report.summary;
  out.push_str(&format!(
    "saved: {}  pending review: {}  failed: {}\n",
    summary.saved, summary.pending_review, summary.failed
  ));
  out
}

pub fn compatibility(
  food: &str,
  restriction: &str,
  c: &Compatibility,
) -> String {
  if c.compatible {
    format!("{food:?} is compatible with {restriction}")
  } else {
    format!(
      "{food:?} is not compatible with {restriction}: contains {}",
      c.violating_ingredients.join(", ")
    )
  }
}

pub fn food_conflicts(constraint: &str, hits: &[FoodConflict]) -> String {
  if hits.is_empty() {
    return format!("no foods conflict with {constraint:?}\n");
  }
  hits
    .iter()
    .map(|h| format!("{}: {}\n", h.food, h.reason))
    .collect()
}

#[cfg(test)]
mod tests {
  use rapport_conflict::validate_batch;
  use rapport_core::RelationType;
  use uuid::Uuid;

  use super::*;

  #[test]
  fn batch_lists_each_outcome_and_summary() {
    let s = Uuid::new_v4();
    let existing =
      vec![RelationFact::new(s, RelationType::Dislikes, "ice cream")];
    let candidates = vec![
      RelationFact::new(s, RelationType::Likes, "hiking"),
      RelationFact::new(s, RelationType::Likes, "ice cream"),
    ];
    let report = validate_batch(&candidates, &existing);

    let text = batch(&report, &candidates);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("save"));
    assert!(lines[0].ends_with(r#"likes "hiking""#));
    assert!(lines[1].starts_with("reject"));
    assert!(lines[2].trim_start().starts_with("critical:"));
    assert_eq!(
      lines.last().copied(),
      Some("saved: 1  pending review: 0  failed: 1")
    );
  }

  #[test]
  fn compatibility_names_violations() {
    let c = Compatibility {
      compatible:            false,
      violating_ingredients: vec!["dairy".into(), "milk".into()],
    };
    assert_eq!(
      compatibility("cheese", "vegan", &c),
      r#""cheese" is not compatible with vegan: contains dairy, milk"#
    );
  }
}
