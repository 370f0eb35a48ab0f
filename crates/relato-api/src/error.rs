//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure maps to the `{ "error": "<message>" }` envelope; a success
//! status is never paired with an error payload.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use relato_core::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Bad create input — missing/empty required field or story too short.
  #[error("{0}")]
  Validation(#[from] ValidationError),

  /// Request body was not valid structured data; rejected before any
  /// validation ran.
  #[error("malformed request body: {0}")]
  MalformedRequest(String),

  #[error("story {0} not found")]
  NotFound(i64),

  /// The persistence backend is unreachable or rejected the operation.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Validation(_) | ApiError::MalformedRequest(_) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
