//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Partial numbers are stored as
//! plain integers and widened/narrowed at this boundary.

use alumnos_core::student::Student;
use chrono::{DateTime, Utc};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// Column order expected by [`RawStudent::from_row`].
pub const STUDENT_COLUMNS: &str =
  "id, name, lastname1, lastname2, course_id, current_semester, created_at";

/// A `students` row before timestamp decoding.
pub struct RawStudent {
  pub id:               i64,
  pub name:             String,
  pub lastname1:        String,
  pub lastname2:        String,
  pub course_id:        i64,
  pub current_semester: i64,
  pub created_at:       String,
}

impl RawStudent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      name:             row.get(1)?,
      lastname1:        row.get(2)?,
      lastname2:        row.get(3)?,
      course_id:        row.get(4)?,
      current_semester: row.get(5)?,
      created_at:       row.get(6)?,
    })
  }

  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      id:               self.id,
      name:             self.name,
      lastname1:        self.lastname1,
      lastname2:        self.lastname2,
      course_id:        self.course_id,
      current_semester: self.current_semester,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

/// Split the comma-separated output of `GROUP_CONCAT(partial_number)`.
pub fn decode_partial_list(s: Option<&str>) -> Vec<u32> {
  s.map(|s| s.split(',').filter_map(|p| p.trim().parse().ok()).collect())
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dt_roundtrip() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
  }

  #[test]
  fn bad_dt_is_date_parse_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }

  #[test]
  fn partial_list_decoding() {
    assert_eq!(decode_partial_list(None), Vec::<u32>::new());
    assert_eq!(decode_partial_list(Some("1,3,2")), [1, 3, 2]);
  }
}
