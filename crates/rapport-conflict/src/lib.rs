//! Conflict detection and the review gate for proposed relation facts.
//!
//! Before a candidate fact about a person is persisted, the caller hands it
//! to [`validate_relation`] together with everything already known about that
//! person. The [`detect`] module compares the candidate against each existing
//! fact using three rules (direct contradiction, ingredient conflict, and
//! logical implication from a dietary restriction); the [`validate`] module
//! folds the resulting conflicts into a decision; [`gate`] maps that decision
//! onto what the caller should do and aggregates batches.
//!
//! Everything here is synchronous and pure: no I/O, no shared mutable state.

pub mod conflict;
pub mod detect;
pub mod gate;
pub mod validate;

pub use conflict::{Conflict, ConflictType, Severity};
pub use detect::{Detector, detect_conflicts};
pub use gate::{
  BatchOutcome, BatchReport, BatchSummary, Disposition, validate_batch,
};
pub use validate::{ValidationResult, Validator, validate_relation};
