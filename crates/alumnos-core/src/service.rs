//! [`GradeBook`] — the enrollment, grading and reporting operations.
//!
//! Every operation validates its input before touching the store, so a
//! rejected call never performs a write. Store failures are converted into
//! [`Error`] and returned immediately; nothing is retried.

use crate::{
  Error, Result,
  catalog::{Course, Semester, Subject},
  error::ErrorKind,
  grades::GroupedGrades,
  pending::{PendingGrade, pending_from_progress},
  store::GradeStore,
  student::{Enrollment, NewStudent, Student},
};

/// Service facade over a [`GradeStore`] handle.
///
/// Cloning is as cheap as cloning the store.
#[derive(Debug, Clone)]
pub struct GradeBook<S> {
  store:             S,
  expected_partials: Option<u32>,
}

impl<S: GradeStore> GradeBook<S> {
  pub fn new(store: S) -> Self { Self { store, expected_partials: None } }

  /// Report every missing partial in `1..=n` from [`Self::pending_grades`]
  /// instead of only fully ungraded enrollments.
  pub fn with_expected_partials(mut self, expected: Option<u32>) -> Self {
    self.expected_partials = expected;
    self
  }

  pub fn store(&self) -> &S { &self.store }

  // ── Enrollment ────────────────────────────────────────────────────────

  /// Register a student and enroll them in `input.subject_ids` for their
  /// current semester, atomically. Returns the new student id.
  pub async fn register_student(&self, input: NewStudent) -> Result<i64> {
    if input.name.trim().is_empty() {
      return Err(Error::validation("name is required"));
    }
    if input.lastname1.trim().is_empty() {
      return Err(Error::validation("lastname1 is required"));
    }
    require_id("course_id", input.course_id)?;
    require_id("current_semester", input.current_semester)?;
    require_subject_ids(&input.subject_ids)?;

    let subjects = input.subject_ids.len();
    let id = self
      .store
      .register_student(input)
      .await
      .map_err(store_error("register_student"))?;

    tracing::info!(student_id = id, subjects, "registered student");
    Ok(id)
  }

  /// Enroll an existing student in `subject_ids` for `semester_id`,
  /// atomically.
  pub async fn enroll_in_semester(
    &self,
    student_id: i64,
    semester_id: i64,
    subject_ids: Vec<i64>,
  ) -> Result<()> {
    require_id("student_id", student_id)?;
    require_id("semester_id", semester_id)?;
    if subject_ids.is_empty() {
      return Err(Error::validation("subject_ids must not be empty"));
    }
    require_subject_ids(&subject_ids)?;

    let subjects = subject_ids.len();
    self
      .store
      .enroll(student_id, semester_id, subject_ids)
      .await
      .map_err(store_error("enroll_in_semester"))?;

    tracing::info!(student_id, semester_id, subjects, "enrolled student in semester");
    Ok(())
  }

  // ── Grading ───────────────────────────────────────────────────────────

  /// Record the grade for one partial of an enrollment, overwriting any
  /// previous value for the same partial.
  pub async fn record_partial_grade(
    &self,
    enrollment_id: i64,
    partial_number: i64,
    grade: f64,
  ) -> Result<()> {
    require_id("semester_course_id", enrollment_id)?;
    let partial_number = u32::try_from(partial_number)
      .ok()
      .filter(|n| *n > 0)
      .ok_or_else(|| Error::validation("partial_number must be a positive integer"))?;
    if grade.is_nan() || grade < 0.0 {
      return Err(Error::validation("grade must be zero or greater"));
    }

    self
      .store
      .upsert_partial_grade(enrollment_id, partial_number, grade)
      .await
      .map_err(store_error("record_partial_grade"))?;

    tracing::info!(enrollment_id, partial_number, grade, "recorded partial grade");
    Ok(())
  }

  // ── Reporting ─────────────────────────────────────────────────────────

  /// All of the student's grades grouped by semester and subject, with
  /// per-subject, per-semester and overall averages.
  pub async fn grouped_averages(&self, student_id: i64) -> Result<GroupedGrades> {
    self.existing_student(student_id).await?;

    let rows = self
      .store
      .grade_rows(student_id)
      .await
      .map_err(store_error("grouped_averages"))?;

    let grouped = GroupedGrades::from_rows(rows);
    tracing::debug!(student_id, semesters = grouped.semesters.len(), "computed grouped averages");
    Ok(grouped)
  }

  /// Grades still missing for the student's current semester.
  pub async fn pending_grades(&self, student_id: i64) -> Result<Vec<PendingGrade>> {
    self.existing_student(student_id).await?;

    let progress = self
      .store
      .current_semester_progress(student_id)
      .await
      .map_err(store_error("pending_grades"))?;

    Ok(pending_from_progress(progress, self.expected_partials))
  }

  pub async fn enrollments_for_student(&self, student_id: i64) -> Result<Vec<Enrollment>> {
    require_id("student_id", student_id)?;
    self
      .store
      .list_enrollments(student_id)
      .await
      .map_err(store_error("enrollments_for_student"))
  }

  // ── Reference data ────────────────────────────────────────────────────

  pub async fn students(&self) -> Result<Vec<Student>> {
    self.store.list_students().await.map_err(store_error("students"))
  }

  pub async fn courses(&self) -> Result<Vec<Course>> {
    self.store.list_courses().await.map_err(store_error("courses"))
  }

  pub async fn subjects_for_course(&self, course_id: i64) -> Result<Vec<Subject>> {
    require_id("course_id", course_id)?;
    self
      .store
      .list_subjects(course_id)
      .await
      .map_err(store_error("subjects_for_course"))
  }

  pub async fn semesters(&self) -> Result<Vec<Semester>> {
    self.store.list_semesters().await.map_err(store_error("semesters"))
  }

  async fn existing_student(&self, student_id: i64) -> Result<Student> {
    require_id("student_id", student_id)?;
    self
      .store
      .get_student(student_id)
      .await
      .map_err(store_error("get_student"))?
      .ok_or_else(|| Error::NotFound(format!("student {student_id} not found")))
  }
}

fn require_id(field: &str, id: i64) -> Result<()> {
  if id <= 0 {
    return Err(Error::validation(format!("{field} is required")));
  }
  Ok(())
}

fn require_subject_ids(ids: &[i64]) -> Result<()> {
  ids.iter().try_for_each(|&id| require_id("subject id", id))
}

/// Convert a backend error, logging storage faults louder than rejections.
fn store_error<E: Into<Error>>(op: &'static str) -> impl FnOnce(E) -> Error {
  move |e| {
    let err = e.into();
    match err.kind() {
      ErrorKind::Storage => tracing::error!(op, error = %err, "store failure"),
      _ => tracing::warn!(op, error = %err, "store rejected request"),
    }
    err
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  };

  use chrono::Utc;

  use super::*;
  use crate::{grades::GradeRow, pending::EnrollmentProgress};

  #[derive(Debug, thiserror::Error)]
  #[error("unique constraint failed")]
  struct FakeConflict;

  impl From<FakeConflict> for Error {
    fn from(e: FakeConflict) -> Self { Error::Conflict(e.to_string()) }
  }

  /// Counts writes and serves canned reads.
  #[derive(Default)]
  struct FakeStore {
    writes:   AtomicUsize,
    rows:     Mutex<Vec<GradeRow>>,
    progress: Mutex<Vec<EnrollmentProgress>>,
    conflict: bool,
  }

  impl FakeStore {
    fn writes(&self) -> usize { self.writes.load(Ordering::SeqCst) }

    fn write(&self) -> Result<(), FakeConflict> {
      self.writes.fetch_add(1, Ordering::SeqCst);
      if self.conflict { Err(FakeConflict) } else { Ok(()) }
    }
  }

  impl GradeStore for FakeStore {
    type Error = FakeConflict;

    async fn register_student(&self, _: NewStudent) -> Result<i64, FakeConflict> {
      self.write().map(|_| 1)
    }
    async fn enroll(&self, _: i64, _: i64, _: Vec<i64>) -> Result<(), FakeConflict> {
      self.write()
    }
    async fn upsert_partial_grade(&self, _: i64, _: u32, _: f64) -> Result<(), FakeConflict> {
      self.write()
    }
    async fn get_student(&self, id: i64) -> Result<Option<Student>, FakeConflict> {
      Ok((id == 1).then(|| Student {
        id,
        name: "Ana".into(),
        lastname1: "Ruiz".into(),
        lastname2: String::new(),
        course_id: 1,
        current_semester: 1,
        created_at: Utc::now(),
      }))
    }
    async fn grade_rows(&self, _: i64) -> Result<Vec<GradeRow>, FakeConflict> {
      Ok(self.rows.lock().unwrap().clone())
    }
    async fn current_semester_progress(
      &self,
      _: i64,
    ) -> Result<Vec<EnrollmentProgress>, FakeConflict> {
      Ok(self.progress.lock().unwrap().clone())
    }
    async fn list_enrollments(&self, _: i64) -> Result<Vec<Enrollment>, FakeConflict> {
      Ok(Vec::new())
    }
    async fn list_students(&self) -> Result<Vec<Student>, FakeConflict> { Ok(Vec::new()) }
    async fn list_courses(&self) -> Result<Vec<Course>, FakeConflict> { Ok(Vec::new()) }
    async fn list_subjects(&self, _: i64) -> Result<Vec<Subject>, FakeConflict> {
      Ok(Vec::new())
    }
    async fn list_semesters(&self) -> Result<Vec<Semester>, FakeConflict> { Ok(Vec::new()) }
  }

  fn new_student() -> NewStudent {
    NewStudent {
      name: "Ana".into(),
      lastname1: "Ruiz".into(),
      lastname2: "Soto".into(),
      course_id: 1,
      current_semester: 1,
      subject_ids: vec![1, 2],
    }
  }

  #[tokio::test]
  async fn register_requires_name_fields_and_ids() {
    let book = GradeBook::new(FakeStore::default());

    for input in [
      NewStudent { name: "  ".into(), ..new_student() },
      NewStudent { lastname1: String::new(), ..new_student() },
      NewStudent { course_id: 0, ..new_student() },
      NewStudent { current_semester: 0, ..new_student() },
    ] {
      let err = book.register_student(input).await.unwrap_err();
      assert_eq!(err.kind(), ErrorKind::Validation);
    }
    assert_eq!(book.store().writes(), 0);
  }

  #[tokio::test]
  async fn register_allows_missing_second_lastname() {
    let book = GradeBook::new(FakeStore::default());
    let input = NewStudent { lastname2: String::new(), ..new_student() };
    assert_eq!(book.register_student(input).await.unwrap(), 1);
    assert_eq!(book.store().writes(), 1);
  }

  #[tokio::test]
  async fn enroll_rejects_empty_subjects() {
    let book = GradeBook::new(FakeStore::default());

    let err = book.enroll_in_semester(1, 2, Vec::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = book.enroll_in_semester(0, 2, vec![1]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = book.enroll_in_semester(1, 0, vec![1]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(book.store().writes(), 0);
  }

  #[tokio::test]
  async fn zero_subject_id_is_rejected_without_write() {
    let book = GradeBook::new(FakeStore::default());

    let input = NewStudent { subject_ids: vec![1, 0], ..new_student() };
    let err = book.register_student(input).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = book.enroll_in_semester(1, 2, vec![0]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = book.enroll_in_semester(1, 2, vec![4, -3]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(book.store().writes(), 0);
  }

  #[tokio::test]
  async fn negative_grade_is_rejected_without_write() {
    let book = GradeBook::new(FakeStore::default());

    let err = book.record_partial_grade(1, 1, -1.0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = book.record_partial_grade(1, 0, 8.0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = book.record_partial_grade(0, 1, 8.0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = book.record_partial_grade(1, -2, 8.0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(book.store().writes(), 0);

    book.record_partial_grade(1, 1, 0.0).await.unwrap();
    assert_eq!(book.store().writes(), 1);
  }

  #[tokio::test]
  async fn store_conflicts_keep_their_kind() {
    let book = GradeBook::new(FakeStore { conflict: true, ..Default::default() });
    let err = book.enroll_in_semester(1, 1, vec![3, 3]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
  }

  #[tokio::test]
  async fn grouped_averages_for_unknown_student_is_not_found() {
    let book = GradeBook::new(FakeStore::default());
    let err = book.grouped_averages(42).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
  }

  #[tokio::test]
  async fn grouped_averages_without_grades_is_empty() {
    let book = GradeBook::new(FakeStore::default());
    let grouped = book.grouped_averages(1).await.unwrap();
    assert!(grouped.is_empty());
    assert_eq!(grouped.overall_average, 0.0);
  }

  #[tokio::test]
  async fn pending_grades_honours_expected_partials() {
    let store = FakeStore::default();
    *store.progress.lock().unwrap() = vec![EnrollmentProgress {
      enrollment_id:     5,
      semester_id:       1,
      subject_id:        3,
      subject_name:      "CALCULO I".into(),
      recorded_partials: vec![1],
    }];

    let book = GradeBook::new(store);
    assert!(book.pending_grades(1).await.unwrap().is_empty());

    let book = book.with_expected_partials(Some(3));
    let pending = book.pending_grades(1).await.unwrap();
    let partials: Vec<_> = pending.iter().map(|p| p.partial_number).collect();
    assert_eq!(partials, [Some(2), Some(3)]);
  }
}
