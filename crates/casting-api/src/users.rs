//! Handler for `GET /user/{uid}`.

use axum::{
  Json,
  extract::{Path, State},
};
use casting_core::{store::ProfileStore, user::UserId, view::ProfileView};

use crate::{ApiError, ApiState, projection::project};

/// `GET /user/{uid}`: identity fields plus a role-specific `profile` object.
/// A user without a profile row gets default profile values.
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(uid): Path<String>,
) -> Result<Json<ProfileView>, ApiError>
where
  S: ProfileStore,
{
  let user_id = UserId::new(uid)?;
  Ok(Json(project(&*state.store, &state.media, user_id).await?))
}
