//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("not implemented: {0}")]
  NotImplemented(&'static str),

  /// An axum extractor rejection, keeping its status (e.g. 413).
  #[error("rejected request: {1}")]
  Rejected(StatusCode, String),

  /// A storage failure. Logged in full, reported to the client generically.
  #[error("store error: {source}")]
  Store {
    /// Client-facing summary, e.g. "Error processing user".
    context: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// `map_err` adaptor for store failures.
  pub fn store<E>(context: &'static str) -> impl FnOnce(E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    move |e| Self::Store { context, source: Box::new(e) }
  }
}

impl From<casting_core::Error> for ApiError {
  fn from(e: casting_core::Error) -> Self {
    use casting_core::Error as E;
    match e {
      E::Validation(m) => Self::BadRequest(m),
      E::UnknownRole(r) => {
        Self::BadRequest(format!("Invalid user_type {r:?}; expected actor or filmmaker"))
      }
      E::NotFound(m) => Self::NotFound(m),
      other => Self::BadRequest(other.to_string()),
    }
  }
}

impl From<axum::extract::rejection::BytesRejection> for ApiError {
  fn from(e: axum::extract::rejection::BytesRejection) -> Self {
    Self::Rejected(e.status(), e.body_text())
  }
}

impl From<axum::extract::multipart::MultipartRejection> for ApiError {
  fn from(e: axum::extract::multipart::MultipartRejection) -> Self {
    Self::Rejected(e.status(), e.body_text())
  }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
  fn from(e: axum::extract::multipart::MultipartError) -> Self {
    Self::Rejected(e.status(), e.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Rejected(status, m) => (*status, m.clone()),
      ApiError::NotImplemented(what) => {
        (StatusCode::NOT_IMPLEMENTED, format!("{what} is not implemented"))
      }
      ApiError::Store { context, source } => {
        tracing::error!(error = %source, "{context}");
        (StatusCode::INTERNAL_SERVER_ERROR, (*context).to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
