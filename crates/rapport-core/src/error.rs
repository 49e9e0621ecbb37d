//! Error types for `rapport-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown relation type: {0:?}")]
  UnknownRelationType(String),

  #[error("unknown relation status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown relation source: {0:?}")]
  UnknownSource(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
