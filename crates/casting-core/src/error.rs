//! Error types for `casting-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Missing or malformed required input.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// An embedded image that is not a `data:image/<subtype>;base64,` URL.
  #[error("malformed image encoding: {0}")]
  MalformedEncoding(String),

  #[error("unknown user type: {0:?}")]
  UnknownRole(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
