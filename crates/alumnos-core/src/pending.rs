//! Pending work: which enrollments in a student's current semester still lack
//! grades.

use serde::{Deserialize, Serialize};

/// An enrollment in the student's current semester together with the partial
/// numbers already graded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentProgress {
  pub enrollment_id:     i64,
  pub semester_id:       i64,
  pub subject_id:        i64,
  pub subject_name:      String,
  pub recorded_partials: Vec<u32>,
}

/// A grade that has not been recorded yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingGrade {
  pub enrollment_id:  i64,
  pub semester_id:    i64,
  pub subject_id:     i64,
  pub subject_name:   String,
  /// `None` when the whole enrollment is ungraded and no expected partial
  /// count is configured.
  pub partial_number: Option<u32>,
}

/// Derive pending grades from enrollment progress.
///
/// With `expected_partials = None`, only enrollments with zero recorded
/// grades are reported, once each. With `Some(n)`, every partial number in
/// `1..=n` missing from an enrollment is reported.
pub fn pending_from_progress(
  progress: Vec<EnrollmentProgress>,
  expected_partials: Option<u32>,
) -> Vec<PendingGrade> {
  let mut pending = Vec::new();

  for p in progress {
    match expected_partials {
      None => {
        if p.recorded_partials.is_empty() {
          pending.push(PendingGrade {
            enrollment_id:  p.enrollment_id,
            semester_id:    p.semester_id,
            subject_id:     p.subject_id,
            subject_name:   p.subject_name,
            partial_number: None,
          });
        }
      }
      Some(n) => {
        for partial in (1..=n).filter(|k| !p.recorded_partials.contains(k)) {
          pending.push(PendingGrade {
            enrollment_id:  p.enrollment_id,
            semester_id:    p.semester_id,
            subject_id:     p.subject_id,
            subject_name:   p.subject_name.clone(),
            partial_number: Some(partial),
          });
        }
      }
    }
  }

  pending
}
