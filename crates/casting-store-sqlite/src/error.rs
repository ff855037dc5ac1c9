//! Error type for `casting-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] casting_core::Error),

  /// Any rejection by SQLite, including constraint violations such as a
  /// duplicate email.
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unexpected column value: {0}")]
  Decode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for tokio_rusqlite::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Database(inner) => inner,
      other => tokio_rusqlite::Error::Other(Box::new(other)),
    }
  }
}

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self { Self::Database(e.into()) }
}
