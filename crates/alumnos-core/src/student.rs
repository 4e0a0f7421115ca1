//! Students and their enrollments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
  pub id:               i64,
  pub name:             String,
  pub lastname1:        String,
  pub lastname2:        String,
  pub course_id:        i64,
  /// Points into the semester catalog; drives the pending-grades query.
  pub current_semester: i64,
  pub created_at:       DateTime<Utc>,
}

/// Input to [`GradeStore::register_student`](crate::store::GradeStore::register_student).
///
/// `subject_ids` are enrolled under `current_semester` in the same transaction
/// that creates the student.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewStudent {
  pub name:             String,
  pub lastname1:        String,
  pub lastname2:        String,
  pub course_id:        i64,
  pub current_semester: i64,
  pub subject_ids:      Vec<i64>,
}

/// A student's link to one subject within one semester; the unit of grading.
///
/// Callers refer to it as a "semester course" and pass its `id` when
/// recording partial grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
  pub id:            i64,
  pub student_id:    i64,
  pub semester_id:   i64,
  pub semester_name: String,
  pub subject_id:    i64,
  pub subject_name:  String,
}
