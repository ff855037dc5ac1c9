//! The read projection shared by the two profile read endpoints.

use casting_core::{
  store::ProfileStore,
  user::UserId,
  view::ProfileView,
};

use crate::{ApiError, media::MediaRoot};

/// Load a user and its role-matched profile and assemble the combined view.
///
/// A missing profile row is substituted with defaults (check
/// [`ProfileView::profile_stored`] to tell); only a missing user is an error.
#[tracing::instrument(skip_all, fields(user_id = %user_id))]
pub async fn project<S>(
  store: &S,
  media: &MediaRoot,
  user_id: UserId,
) -> Result<ProfileView, ApiError>
where
  S: ProfileStore,
{
  let user = store
    .get_user(user_id.clone())
    .await
    .map_err(ApiError::store("Error fetching user data"))?
    .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

  let profile = store
    .get_role_profile(user_id, user.role)
    .await
    .map_err(ApiError::store("Error fetching user data"))?;
  if profile.is_none() {
    tracing::debug!(role = %user.role, "no profile row; using defaults");
  }

  let picture = media
    .resolve(
      profile
        .as_ref()
        .and_then(|p| p.common().embedded_image.as_deref()),
    )
    .await;

  Ok(ProfileView::assemble(user, profile, picture))
}
