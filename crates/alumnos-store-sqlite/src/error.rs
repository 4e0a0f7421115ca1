//! Error type for `alumnos-store-sqlite`.

use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// An enrollment insert failed; the surrounding transaction was rolled back.
  #[error("could not enroll subject {subject_id}: {source}")]
  Enrollment {
    subject_id: i64,
    #[source]
    source:     rusqlite::Error,
  },

  #[error("could not record partial {partial_number} of enrollment {enrollment_id}: {source}")]
  Grade {
    enrollment_id:  i64,
    partial_number: u32,
    #[source]
    source:         rusqlite::Error,
  },

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl Error {
  fn sqlite_cause(&self) -> Option<&rusqlite::Error> {
    match self {
      Error::Database(tokio_rusqlite::Error::Rusqlite(e)) => Some(e),
      Error::Enrollment { source, .. } | Error::Grade { source, .. } => Some(source),
      _ => None,
    }
  }

  /// `true` if SQLite rejected the write because of a UNIQUE or PRIMARY KEY
  /// constraint.
  pub fn is_unique_violation(&self) -> bool {
    matches!(
      self.sqlite_cause(),
      Some(rusqlite::Error::SqliteFailure(e, _))
        if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
          || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
  }
}

impl From<Error> for alumnos_core::Error {
  fn from(e: Error) -> Self {
    if e.is_unique_violation() {
      alumnos_core::Error::Conflict(e.to_string())
    } else {
      alumnos_core::Error::Storage(Box::new(e))
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
