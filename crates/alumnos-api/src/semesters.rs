//! Handlers for `/semesters` and `/semester-courses`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/semesters` | The semester catalog |
//! | `POST` | `/semesters` | Body: [`EnrollBody`]; enrolls subjects atomically |
//! | `POST` | `/semester-courses` | Body: `{"student_id":1}`; the student's enrollments |

use std::sync::Arc;

use alumnos_core::{GradeBook, catalog::Semester, store::GradeStore, student::Enrollment};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
  StudentBody,
  error::{ApiError, JsonBody},
};

/// `GET /semesters`
pub async fn list<S>(State(book): State<Arc<GradeBook<S>>>) -> Result<Json<Vec<Semester>>, ApiError>
where
  S: GradeStore,
{
  Ok(Json(book.semesters().await?))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EnrollBody {
  pub student_id:  i64,
  pub semester_id: i64,
  pub subject_ids: Vec<i64>,
}

/// `POST /semesters`
pub async fn enroll<S>(
  State(book): State<Arc<GradeBook<S>>>,
  JsonBody(body): JsonBody<EnrollBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GradeStore,
{
  book
    .enroll_in_semester(body.student_id, body.semester_id, body.subject_ids)
    .await?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "student enrolled in semester" })),
  ))
}

/// `POST /semester-courses`
pub async fn enrollments<S>(
  State(book): State<Arc<GradeBook<S>>>,
  JsonBody(body): JsonBody<StudentBody>,
) -> Result<Json<Vec<Enrollment>>, ApiError>
where
  S: GradeStore,
{
  Ok(Json(book.enrollments_for_student(body.student_id).await?))
}
