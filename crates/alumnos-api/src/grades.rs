//! Handlers for `/grades` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/grades/partial` | Body: [`PartialGradeBody`]; insert or overwrite |
//! | `POST` | `/grades/grouped` | Body: `{"student_id":1}`; [`GroupedGrades`] |

use std::sync::Arc;

use alumnos_core::{GradeBook, grades::GroupedGrades, store::GradeStore};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
  StudentBody,
  error::{ApiError, JsonBody},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PartialGradeBody {
  /// Id of the enrollment being graded.
  pub semester_course_id: i64,
  pub partial_number:     i64,
  pub grade:              Option<f64>,
}

/// `POST /grades/partial`
pub async fn record_partial<S>(
  State(book): State<Arc<GradeBook<S>>>,
  JsonBody(body): JsonBody<PartialGradeBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GradeStore,
{
  let grade = body
    .grade
    .ok_or_else(|| ApiError::BadRequest("grade is required".into()))?;
  book
    .record_partial_grade(body.semester_course_id, body.partial_number, grade)
    .await?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "partial grade recorded" })),
  ))
}

/// `POST /grades/grouped`
pub async fn grouped<S>(
  State(book): State<Arc<GradeBook<S>>>,
  JsonBody(body): JsonBody<StudentBody>,
) -> Result<Json<GroupedGrades>, ApiError>
where
  S: GradeStore,
{
  Ok(Json(book.grouped_averages(body.student_id).await?))
}
