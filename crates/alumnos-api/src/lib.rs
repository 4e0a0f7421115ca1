//! JSON REST API for the alumnos grade book.
//!
//! Exposes an axum [`Router`] backed by a [`GradeBook`] over any
//! [`GradeStore`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/v1", alumnos_api::api_router(book.clone()))
//! ```

pub mod courses;
pub mod error;
pub mod grades;
pub mod semesters;
pub mod students;

use std::sync::Arc;

use alumnos_core::{GradeBook, store::GradeStore};
use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;

pub use error::ApiError;

/// Body shared by every endpoint that only needs a student id.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StudentBody {
  pub student_id: i64,
}

/// Build a fully-materialised API router for `book`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(book: Arc<GradeBook<S>>) -> Router<()>
where
  S: GradeStore + 'static,
{
  Router::new()
    // Students
    .route("/students", get(students::list::<S>).post(students::register::<S>))
    .route("/students/pending-grades", post(students::pending::<S>))
    // Semesters and enrollments
    .route("/semesters", get(semesters::list::<S>).post(semesters::enroll::<S>))
    .route("/semester-courses", post(semesters::enrollments::<S>))
    // Grades
    .route("/grades/partial", post(grades::record_partial::<S>))
    .route("/grades/grouped", post(grades::grouped::<S>))
    // Catalog
    .route("/courses", get(courses::list::<S>))
    .route("/courses/subjects", post(courses::subjects::<S>))
    .with_state(book)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use alumnos_store_sqlite::SqliteStore;
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(GradeBook::new(store)))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(b) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(b.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn register(app: &Router, subjects: &[i64]) -> i64 {
    let subjects: Vec<_> = subjects.iter().map(|id| json!({ "id": id })).collect();
    let (status, body) = send(
      app,
      "POST",
      "/students",
      Some(json!({
        "name": "Ana",
        "lastname1": "Ruiz",
        "lastname2": "Soto",
        "course_id": 1,
        "current_course_id": 1,
        "subjects": subjects,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["student_id"].as_i64().unwrap()
  }

  async fn enrollment_ids(app: &Router, student_id: i64) -> Vec<i64> {
    let (status, body) =
      send(app, "POST", "/semester-courses", Some(json!({ "student_id": student_id }))).await;
    assert_eq!(status, StatusCode::OK);
    body
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["id"].as_i64().unwrap())
      .collect()
  }

  // ── Registration ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn register_returns_201_and_lists_student() {
    let app = app().await;
    let id = register(&app, &[1, 2]).await;

    let (status, body) = send(&app, "GET", "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], id);
    assert_eq!(body[0]["current_semester"], 1);
  }

  #[tokio::test]
  async fn register_missing_fields_is_400() {
    let app = app().await;
    let (status, body) =
      send(&app, "POST", "/students", Some(json!({ "name": "Ana", "course_id": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("lastname1"));
  }

  #[tokio::test]
  async fn malformed_json_is_400() {
    let app = app().await;
    let req = Request::builder()
      .method("POST")
      .uri("/grades/grouped")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn subject_without_id_is_400() {
    let app = app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/students",
      Some(json!({
        "name": "Ana",
        "lastname1": "Ruiz",
        "course_id": 1,
        "current_course_id": 1,
        "subjects": [{}],
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("subject id"));

    let (_, students) = send(&app, "GET", "/students", None).await;
    assert_eq!(students, json!([]));
  }

  // ── Enrollment ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn duplicate_enrollment_is_409_and_atomic() {
    let app = app().await;
    let id = register(&app, &[1]).await;

    let (status, _) = send(
      &app,
      "POST",
      "/semesters",
      Some(json!({ "student_id": id, "semester_id": 1, "subject_ids": [2, 1] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(enrollment_ids(&app, id).await.len(), 1);
  }

  #[tokio::test]
  async fn enroll_without_subjects_is_400() {
    let app = app().await;
    let id = register(&app, &[]).await;
    let (status, _) = send(
      &app,
      "POST",
      "/semesters",
      Some(json!({ "student_id": id, "semester_id": 2, "subject_ids": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
      &app,
      "POST",
      "/semesters",
      Some(json!({ "student_id": id, "semester_id": 2, "subject_ids": [0] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(enrollment_ids(&app, id).await.is_empty());
  }

  // ── Grades ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn partial_grades_feed_grouped_averages() {
    let app = app().await;
    let id = register(&app, &[1, 2]).await;
    let enrollments = enrollment_ids(&app, id).await;

    for (enrollment, partial, grade) in
      [(enrollments[0], 1, 8.0), (enrollments[0], 2, 10.0), (enrollments[1], 1, 6.0)]
    {
      let (status, _) = send(
        &app,
        "POST",
        "/grades/partial",
        Some(json!({
          "semester_course_id": enrollment,
          "partial_number": partial,
          "grade": grade,
        })),
      )
      .await;
      assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) =
      send(&app, "POST", "/grades/grouped", Some(json!({ "student_id": id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["semesters"][0]["subjects"][0]["average"], 9.0);
    assert_eq!(body["semesters"][0]["subjects"][1]["average"], 6.0);
    assert_eq!(body["overall_average"], 8.0);
  }

  #[tokio::test]
  async fn negative_or_missing_grade_is_400() {
    let app = app().await;
    let id = register(&app, &[1]).await;
    let enrollment = enrollment_ids(&app, id).await[0];

    let (status, _) = send(
      &app,
      "POST",
      "/grades/partial",
      Some(json!({ "semester_course_id": enrollment, "partial_number": 1, "grade": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
      &app,
      "POST",
      "/grades/partial",
      Some(json!({ "semester_course_id": enrollment, "partial_number": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "POST", "/grades/grouped", Some(json!({ "student_id": id }))).await;
    assert_eq!(body["semesters"], json!([]));
    assert_eq!(body["overall_average"], 0.0);
  }

  #[tokio::test]
  async fn grouped_for_unknown_student_is_404() {
    let app = app().await;
    let (status, _) =
      send(&app, "POST", "/grades/grouped", Some(json!({ "student_id": 999 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn pending_grades_shrink_as_grades_arrive() {
    let app = app().await;
    let id = register(&app, &[1, 2]).await;

    let (status, body) =
      send(&app, "POST", "/students/pending-grades", Some(json!({ "student_id": id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let enrollment = enrollment_ids(&app, id).await[0];
    send(
      &app,
      "POST",
      "/grades/partial",
      Some(json!({ "semester_course_id": enrollment, "partial_number": 1, "grade": 7.5 })),
    )
    .await;

    let (_, body) =
      send(&app, "POST", "/students/pending-grades", Some(json!({ "student_id": id }))).await;
    let pending = body.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["subject_id"], 2);
  }

  // ── Catalog ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn catalog_endpoints() {
    let app = app().await;

    let (status, courses) = send(&app, "GET", "/courses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(courses.as_array().unwrap().len(), 1);

    let (status, semesters) = send(&app, "GET", "/semesters", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(semesters.as_array().unwrap().len(), 8);

    let (status, subjects) =
      send(&app, "POST", "/courses/subjects", Some(json!({ "course_id": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(subjects[0]["key"], "LINC01");

    let (status, _) =
      send(&app, "POST", "/courses/subjects", Some(json!({ "course_id": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
