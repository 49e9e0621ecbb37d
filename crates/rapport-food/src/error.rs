//! Error type for `rapport-food`.
//!
//! Lookups never fail; only building a knowledge base from user-supplied
//! extensions can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} entry has an empty name")]
  EmptyName { kind: &'static str },

  #[error("restriction {0:?} forbids no ingredients")]
  EmptyRestriction(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
