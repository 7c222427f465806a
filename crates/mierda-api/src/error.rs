//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use mierda_core::store::CompetitionStore;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Every variant renders as
/// `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The connection string is missing; reported on every route.
  #[error("{0} not set")]
  Configuration(&'static str),

  #[error("{}", .0.join("; "))]
  Validation(Vec<String>),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("unauthorized")]
  Unauthorized,

  #[error("{0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a store failure, logging it with whatever diagnostics the backend
  /// can provide. The caller sees only the raw message.
  pub fn store<S: CompetitionStore>(err: S::Error) -> Self {
    let diagnostics = S::diagnostics(&err);
    tracing::error!(
      error = %err,
      code = diagnostics.code.as_deref(),
      detail = diagnostics.detail.as_deref(),
      "store operation failed"
    );
    ApiError::Store(Box::new(err))
  }
}

impl From<mierda_core::Error> for ApiError {
  fn from(err: mierda_core::Error) -> Self {
    match err {
      mierda_core::Error::Validation(messages) => ApiError::Validation(messages),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Configuration(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
