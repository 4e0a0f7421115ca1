//! Partial grades and the grouped-averages read model.
//!
//! [`GroupedGrades`] is never stored. It is derived on every read from the
//! flat [`GradeRow`] scan returned by the store, grouped by semester and then
//! by subject.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─── Scan rows ───────────────────────────────────────────────────────────────

/// One recorded partial grade, joined with its enrollment's semester and
/// subject. The store yields these ordered by semester, subject, partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRow {
  pub semester_id:    i64,
  pub semester_name:  String,
  pub subject_id:     i64,
  pub subject_name:   String,
  pub partial_number: u32,
  pub grade:          f64,
}

// ─── Read model ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialGrade {
  pub partial_number: u32,
  pub grade:          f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectGrades {
  pub subject_id:   i64,
  pub subject_name: String,
  pub partials:     Vec<PartialGrade>,
  /// Arithmetic mean over whatever partials exist.
  pub average:      f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterGrades {
  pub semester_id:   i64,
  pub semester_name: String,
  pub subjects:      Vec<SubjectGrades>,
  /// Mean of every partial grade recorded in this semester.
  pub average:       f64,
}

/// A student's grades grouped by semester, then subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedGrades {
  /// Ascending by semester id; subjects ascending by subject id.
  pub semesters:       Vec<SemesterGrades>,
  /// Mean of every partial grade across all semesters. `0.0` when the
  /// student has no grades at all.
  pub overall_average: f64,
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
struct Running {
  total: f64,
  count: usize,
}

impl Running {
  fn add(&mut self, grade: f64) {
    self.total += grade;
    self.count += 1;
  }

  fn mean(self) -> f64 {
    if self.count == 0 { 0.0 } else { self.total / self.count as f64 }
  }
}

struct SubjectAcc {
  name:     String,
  partials: Vec<PartialGrade>,
}

struct SemesterAcc {
  name:     String,
  subjects: BTreeMap<i64, SubjectAcc>,
  running:  Running,
}

impl GroupedGrades {
  /// Group `rows` by semester and subject and compute every average.
  ///
  /// Output order is determined by the ids, not by the order of `rows`.
  pub fn from_rows<I>(rows: I) -> Self
  where
    I: IntoIterator<Item = GradeRow>,
  {
    let mut semesters: BTreeMap<i64, SemesterAcc> = BTreeMap::new();
    let mut overall = Running::default();

    for row in rows {
      let semester = semesters
        .entry(row.semester_id)
        .or_insert_with(|| SemesterAcc {
          name:     row.semester_name.clone(),
          subjects: BTreeMap::new(),
          running:  Running::default(),
        });

      semester
        .subjects
        .entry(row.subject_id)
        .or_insert_with(|| SubjectAcc {
          name:     row.subject_name.clone(),
          partials: Vec::new(),
        })
        .partials
        .push(PartialGrade { partial_number: row.partial_number, grade: row.grade });

      semester.running.add(row.grade);
      overall.add(row.grade);
    }

    let semesters = semesters
      .into_iter()
      .map(|(semester_id, acc)| SemesterGrades {
        semester_id,
        semester_name: acc.name,
        average: acc.running.mean(),
        subjects: acc
          .subjects
          .into_iter()
          .map(|(subject_id, s)| {
            // A subject only exists once a row for it was seen.
            let total: f64 = s.partials.iter().map(|p| p.grade).sum();
            let average = total / s.partials.len() as f64;
            SubjectGrades {
              subject_id,
              subject_name: s.name,
              partials: s.partials,
              average,
            }
          })
          .collect(),
      })
      .collect();

    GroupedGrades { semesters, overall_average: overall.mean() }
  }

  /// `true` if no partial grade has been recorded for the student.
  pub fn is_empty(&self) -> bool { self.semesters.is_empty() }
}
