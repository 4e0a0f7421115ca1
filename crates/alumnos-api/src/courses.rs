//! Handlers for `/courses` endpoints.

use std::sync::Arc;

use alumnos_core::{
  GradeBook,
  catalog::{Course, Subject},
  store::GradeStore,
};
use axum::{Json, extract::State};
use serde::Deserialize;

use crate::error::{ApiError, JsonBody};

/// `GET /courses`
pub async fn list<S>(State(book): State<Arc<GradeBook<S>>>) -> Result<Json<Vec<Course>>, ApiError>
where
  S: GradeStore,
{
  Ok(Json(book.courses().await?))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CourseBody {
  pub course_id: i64,
}

/// `POST /courses/subjects` — body: `{"course_id":1}`
pub async fn subjects<S>(
  State(book): State<Arc<GradeBook<S>>>,
  JsonBody(body): JsonBody<CourseBody>,
) -> Result<Json<Vec<Subject>>, ApiError>
where
  S: GradeStore,
{
  Ok(Json(book.subjects_for_course(body.course_id).await?))
}
