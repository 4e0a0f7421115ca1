//! Handlers for `/students` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/students` | All registered students |
//! | `POST` | `/students` | Body: [`RegisterBody`]; returns 201 + `student_id` |
//! | `POST` | `/students/pending-grades` | Body: `{"student_id":1}` |

use std::sync::Arc;

use alumnos_core::{
  GradeBook,
  pending::PendingGrade,
  store::GradeStore,
  student::{NewStudent, Student},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
  StudentBody,
  error::{ApiError, JsonBody},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /students`
pub async fn list<S>(State(book): State<Arc<GradeBook<S>>>) -> Result<Json<Vec<Student>>, ApiError>
where
  S: GradeStore,
{
  Ok(Json(book.students().await?))
}

// ─── Register ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SubjectRef {
  #[serde(default)]
  pub id: i64,
}

/// JSON body accepted by `POST /students`.
///
/// Missing fields decode to their zero value and are rejected by validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterBody {
  pub name:              String,
  pub lastname1:         String,
  pub lastname2:         String,
  pub course_id:         i64,
  /// The semester the student is currently in.
  #[serde(alias = "current_semester")]
  pub current_course_id: i64,
  pub subjects:          Vec<SubjectRef>,
}

impl From<RegisterBody> for NewStudent {
  fn from(b: RegisterBody) -> Self {
    NewStudent {
      name:             b.name,
      lastname1:        b.lastname1,
      lastname2:        b.lastname2,
      course_id:        b.course_id,
      current_semester: b.current_course_id,
      subject_ids:      b.subjects.into_iter().map(|s| s.id).collect(),
    }
  }
}

/// `POST /students` — registers the student and enrolls the listed subjects
/// for the current semester in one transaction.
pub async fn register<S>(
  State(book): State<Arc<GradeBook<S>>>,
  JsonBody(body): JsonBody<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GradeStore,
{
  let student_id = book.register_student(NewStudent::from(body)).await?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "student registered", "student_id": student_id })),
  ))
}

// ─── Pending grades ───────────────────────────────────────────────────────────

/// `POST /students/pending-grades`
pub async fn pending<S>(
  State(book): State<Arc<GradeBook<S>>>,
  JsonBody(body): JsonBody<StudentBody>,
) -> Result<Json<Vec<PendingGrade>>, ApiError>
where
  S: GradeStore,
{
  Ok(Json(book.pending_grades(body.student_id).await?))
}
