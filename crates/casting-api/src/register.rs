//! Handler for `POST /register`.
//!
//! Body: `{"uid", "username", "email", "user_type", "is_profile_complete"?}`.
//! Returns 201 when the identity record was created and 200 when an existing
//! one was updated.

use axum::{Json, extract::State, http::StatusCode};
use bytes::Bytes;
use casting_core::{
  store::ProfileStore,
  user::{Registration, Role, User, UserId},
};
use serde::{Deserialize, Serialize};

use crate::{ApiError, ApiState, parse_json};

/// Request body. Every field is optional at the wire level so that missing
/// fields produce a 400 with a useful message rather than a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterBody {
  pub uid:                 Option<String>,
  pub username:            Option<String>,
  pub email:               Option<String>,
  pub user_type:           Option<String>,
  pub is_profile_complete: Option<bool>,
}

impl TryFrom<RegisterBody> for Registration {
  type Error = casting_core::Error;

  fn try_from(b: RegisterBody) -> Result<Self, Self::Error> {
    Registration::from_parts(
      b.uid,
      b.username,
      b.email,
      b.user_type,
      b.is_profile_complete,
    )
  }
}

/// Identity summary returned by the write endpoints.
#[derive(Debug, Serialize)]
pub struct UserSummary {
  pub id:                  UserId,
  pub username:            String,
  pub email:               String,
  pub user_type:           Role,
  pub is_profile_complete: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_new:              Option<bool>,
}

impl UserSummary {
  pub fn new(user: User, is_new: Option<bool>) -> Self {
    Self {
      id: user.user_id,
      username: user.display_name,
      email: user.email,
      user_type: user.role,
      is_profile_complete: user.profile_complete,
      is_new,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
  pub message: &'static str,
  pub user:    UserSummary,
}

/// `POST /register`
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  body: Bytes,
) -> Result<(StatusCode, Json<UserEnvelope>), ApiError>
where
  S: ProfileStore,
{
  let body: RegisterBody = parse_json(&body)?;
  let registration = Registration::try_from(body).inspect_err(|e| {
    tracing::warn!(error = %e, "rejecting registration");
  })?;

  let registered = state
    .store
    .register(registration)
    .await
    .map_err(ApiError::store("Error processing user"))?;

  let status = if registered.created {
    StatusCode::CREATED
  } else {
    StatusCode::OK
  };

  Ok((
    status,
    Json(UserEnvelope {
      message: "User processed successfully",
      user:    UserSummary::new(registered.user, Some(registered.created)),
    }),
  ))
}
