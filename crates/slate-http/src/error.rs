//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use slate_core::Error as CoreError;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("auth failed")]
  Unauthorized,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("uploaded file exceeds the size limit")]
  PayloadTooLarge,

  #[error(transparent)]
  Domain(#[from] CoreError),

  #[error("token error: {0}")]
  Token(#[from] jsonwebtoken::errors::Error),

  #[error("internal error: {0}")]
  Internal(String),
}

/// Wrap a backend error as a domain-level store failure.
pub(crate) fn store_err<E>(e: E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  ApiError::Domain(CoreError::store(e))
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
      ApiError::Token(_) | ApiError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
      ApiError::Domain(e) => match e {
        CoreError::DuplicateEmail(_) => StatusCode::CONFLICT,
        CoreError::AuthFailed => StatusCode::UNAUTHORIZED,
        CoreError::ClassNotFound(_)
        | CoreError::AssignmentNotFound(_)
        | CoreError::AnswerNotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Forbidden(_) => StatusCode::FORBIDDEN,
        CoreError::PastDueDate { .. }
        | CoreError::NoFieldsProvided
        | CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Store(_) | CoreError::Artifact(_) => {
          StatusCode::INTERNAL_SERVER_ERROR
        }
      },
    };
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
