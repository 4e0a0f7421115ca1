//! Error types for `alumnos-core`.
//!
//! Every failure surfaced by [`GradeBook`](crate::service::GradeBook) falls
//! into one of four kinds so the HTTP layer can map them to distinct status
//! codes. Storage backends convert their own errors into this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Missing or invalid caller input. No write was attempted.
  #[error("validation error: {0}")]
  Validation(String),

  /// A uniqueness constraint on an enrollment or grade key was violated.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// Connection, transaction, or constraint failure not otherwise classified.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Validation,
  Conflict,
  NotFound,
  Storage,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::Validation(_) => ErrorKind::Validation,
      Error::Conflict(_) => ErrorKind::Conflict,
      Error::NotFound(_) => ErrorKind::NotFound,
      Error::Storage(_) => ErrorKind::Storage,
    }
  }

  pub(crate) fn validation(msg: impl Into<String>) -> Self {
    Error::Validation(msg.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
