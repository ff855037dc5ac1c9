//! Declared avatar endpoints. Nothing behind them yet; each answers 501.

use crate::ApiError;

/// `POST /avatar/store/`
pub async fn store() -> Result<(), ApiError> {
  Err(ApiError::NotImplemented("avatar storage"))
}

/// `GET /avatar/get/{uid}`
pub async fn get_one() -> Result<(), ApiError> {
  Err(ApiError::NotImplemented("avatar retrieval"))
}

/// `POST /avatar/match/`
pub async fn find_match() -> Result<(), ApiError> {
  Err(ApiError::NotImplemented("avatar matching"))
}
