use proptest::prelude::*;
use rapport_conflict::{
  ConflictType, Severity, detect_conflicts, validate_relation,
};
use rapport_core::{RelationFact, RelationStatus, RelationType};
use uuid::Uuid;

const FOODS: &[&str] = &[
  "ice cream", "fries", "pizza", "cheese", "bacon", "tofu", "salad", "hiking",
  "drinks milk", "sushi", "peanut butter", "nature",
];

const LABELS: &[&str] = &[
  "vegan", "vegetarian", "kosher", "lactose intolerant", "potato", "dairy",
  "wheat", "peanuts", "meat-eater", "a nurse",
];

fn relation_type() -> impl Strategy<Value = RelationType> {
  prop::sample::select(vec![
    RelationType::Likes,
    RelationType::Dislikes,
    RelationType::Is,
    RelationType::SensitiveTo,
    RelationType::AllergicTo,
    RelationType::RegularlyDoes,
    RelationType::UsedToBe,
    RelationType::HasSkill,
    RelationType::Fears,
    RelationType::WantsToAchieve,
    RelationType::CaresFor,
  ])
}

fn label() -> impl Strategy<Value = String> {
  prop::sample::select(FOODS.iter().chain(LABELS).copied().collect::<Vec<_>>())
    .prop_map(str::to_string)
}

fn status() -> impl Strategy<Value = RelationStatus> {
  prop::sample::select(vec![RelationStatus::Current, RelationStatus::Past])
}

/// Re-case and re-space a label without changing its normalised form.
fn disguise(label: &str, upper: bool, pad: usize) -> String {
  let spaced = label.replace(' ', &" ".repeat(pad + 1));
  let cased = if upper {
    spaced.to_uppercase()
  } else {
    spaced
  };
  format!("{}{cased}{}", " ".repeat(pad), "\t".repeat(pad))
}

// ── Opposing preferences always contradict ───────────────────────────────

proptest! {
  #[test]
  fn likes_and_dislikes_of_same_label_is_critical(
    label in "[a-zA-Z]{1,12}( [a-zA-Z]{1,12}){0,2}",
    upper in any::<bool>(),
    pad in 0usize..3,
    likes_first in any::<bool>(),
  ) {
    let s = Uuid::new_v4();
    let (a, b) = if likes_first {
      (RelationType::Likes, RelationType::Dislikes)
    } else {
      (RelationType::Dislikes, RelationType::Likes)
    };
    let existing = vec![RelationFact::new(s, a, label.clone())];
    let candidate = RelationFact::new(s, b, disguise(&label, upper, pad));

    let conflicts = detect_conflicts(&candidate, &existing);
    let found = conflicts.iter().any(|c| {
      c.conflict_type == ConflictType::DirectContradiction
        && c.severity == Severity::Critical
    });
    prop_assert!(found, "no critical contradiction in {:?}", conflicts);
  }
}

// ── Past and current facts never conflict ────────────────────────────────

proptest! {
  #[test]
  fn past_never_conflicts_with_current(
    new_type in relation_type(),
    new_label in label(),
    old_type in relation_type(),
    old_label in label(),
  ) {
    let s = Uuid::new_v4();
    let candidate = RelationFact::new(s, new_type, new_label);
    let existing = RelationFact::new(s, old_type, old_label)
      .with_status(RelationStatus::Past);
    prop_assume!(candidate.effective_status() == RelationStatus::Current);

    prop_assert!(detect_conflicts(&candidate, [&existing]).is_empty());
    prop_assert!(detect_conflicts(&existing, [&candidate]).is_empty());
  }
}

// ── Validity and review follow the conflicts exactly ─────────────────────

proptest! {
  #[test]
  fn valid_iff_no_critical_conflict(
    new_type in relation_type(),
    new_label in label(),
    new_status in status(),
    others in prop::collection::vec((relation_type(), label(), status()), 0..6),
  ) {
    let s = Uuid::new_v4();
    let candidate =
      RelationFact::new(s, new_type, new_label).with_status(new_status);
    let existing: Vec<RelationFact> = others
      .into_iter()
      .map(|(t, l, st)| RelationFact::new(s, t, l).with_status(st))
      .collect();

    let result = validate_relation(&candidate, &existing);
    let has_critical =
      result.conflicts.iter().any(|c| c.severity == Severity::Critical);
    prop_assert_eq!(result.valid, !has_critical);
    prop_assert_eq!(result.requires_user_review, !result.conflicts.is_empty());
    let non_critical =
      result.conflicts.iter().filter(|c| c.severity != Severity::Critical);
    prop_assert_eq!(result.warnings.len(), non_critical.count());

    let again = validate_relation(&candidate, &existing);
    prop_assert_eq!(result, again);
  }
}
