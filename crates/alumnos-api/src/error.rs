//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::{FromRequest, rejection::JsonRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<alumnos_core::Error> for ApiError {
  fn from(e: alumnos_core::Error) -> Self {
    match e {
      alumnos_core::Error::Validation(m) => ApiError::BadRequest(m),
      alumnos_core::Error::Conflict(m) => ApiError::Conflict(m),
      alumnos_core::Error::NotFound(m) => ApiError::NotFound(m),
      alumnos_core::Error::Storage(e) => ApiError::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// `Json` extractor whose rejections (bad syntax, wrong content type, wrong
/// field types) all surface as [`ApiError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
