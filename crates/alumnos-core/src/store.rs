//! The `GradeStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `alumnos-store-sqlite`).
//! [`GradeBook`](crate::service::GradeBook) validates caller input and then
//! delegates to it; backends may assume their arguments are already valid.

use std::future::Future;

use crate::{
  catalog::{Course, Semester, Subject},
  grades::GradeRow,
  pending::EnrollmentProgress,
  student::{Enrollment, NewStudent, Student},
};

/// Abstraction over the relational store holding students, enrollments and
/// partial grades.
///
/// Multi-row writes must be atomic: either every row is persisted or none is.
/// Backend errors convert into [`crate::Error`] so uniqueness violations can
/// be told apart from other storage failures.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait GradeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert the student and enroll them in `input.subject_ids` under
  /// `input.current_semester`, in one transaction. Returns the new student id.
  fn register_student(
    &self,
    input: NewStudent,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Enroll an existing student in `subject_ids` for `semester_id`, in one
  /// transaction.
  fn enroll(
    &self,
    student_id: i64,
    semester_id: i64,
    subject_ids: Vec<i64>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert or overwrite the grade for `(enrollment_id, partial_number)`.
  fn upsert_partial_grade(
    &self,
    enrollment_id: i64,
    partial_number: u32,
    grade: f64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a student by id. Returns `None` if not found.
  fn get_student(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  /// Every partial grade of the student, ordered by semester, subject and
  /// partial number.
  fn grade_rows(
    &self,
    student_id: i64,
  ) -> impl Future<Output = Result<Vec<GradeRow>, Self::Error>> + Send + '_;

  /// Enrollments in the student's current semester with the partial numbers
  /// already recorded for each.
  fn current_semester_progress(
    &self,
    student_id: i64,
  ) -> impl Future<Output = Result<Vec<EnrollmentProgress>, Self::Error>> + Send + '_;

  fn list_enrollments(
    &self,
    student_id: i64,
  ) -> impl Future<Output = Result<Vec<Enrollment>, Self::Error>> + Send + '_;

  fn list_students(&self) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  // ── Catalog ───────────────────────────────────────────────────────────

  fn list_courses(&self) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + '_;

  fn list_subjects(
    &self,
    course_id: i64,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  fn list_semesters(&self)
  -> impl Future<Output = Result<Vec<Semester>, Self::Error>> + Send + '_;
}
