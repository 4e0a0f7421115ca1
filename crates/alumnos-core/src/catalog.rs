//! Static reference data: programmes, their subjects, and the semester list.
//!
//! Catalog rows are seeded once when the store is opened and never mutated
//! afterwards.

use serde::{Deserialize, Serialize};

/// A degree programme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  pub id:   i64,
  pub name: String,
}

/// A subject belonging to a [`Course`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub id:        i64,
  pub course_id: i64,
  /// Short institutional code, e.g. `LINC01`.
  pub key:       String,
  pub name:      String,
  /// Credit weight.
  pub coins:     u32,
}

/// An entry in the fixed semester catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
  pub id:   i64,
  pub name: String,
}
