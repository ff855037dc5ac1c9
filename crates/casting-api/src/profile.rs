//! Handlers for `/users/profile/{uid}`.
//!
//! | Method | Notes |
//! |--------|-------|
//! | `GET`  | Flat profile card; 404 if the user or its profile row is missing |
//! | `PUT`  | Partial update from a JSON body or a `multipart/form-data` form |

use std::path::Path as FsPath;

use axum::{
  Json,
  extract::{FromRequest, Multipart, Path, Request, State},
  http::{HeaderMap, header},
};
use bytes::Bytes;
use casting_core::{
  image::{EmbeddedImage, subtype_for_mime, subtype_for_path},
  store::ProfileStore,
  update::RawProfileUpdate,
  user::UserId,
  view::ProfileCard,
};

use crate::{
  ApiError, ApiState, parse_json,
  projection::project,
  register::{UserEnvelope, UserSummary},
};

// ─── Read ─────────────────────────────────────────────────────────────────────

/// `GET /users/profile/{uid}`
pub async fn get_card<S>(
  State(state): State<ApiState<S>>,
  Path(uid): Path<String>,
) -> Result<Json<ProfileCard>, ApiError>
where
  S: ProfileStore,
{
  let user_id = UserId::new(uid)?;
  let view = project(&*state.store, &state.media, user_id).await?;
  if !view.profile_stored {
    return Err(ApiError::NotFound("Profile not found".into()));
  }
  Ok(Json(ProfileCard::from(view)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /users/profile/{uid}`
#[tracing::instrument(skip_all, fields(user_id = %uid))]
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(uid): Path<String>,
  req: Request,
) -> Result<Json<UserEnvelope>, ApiError>
where
  S: ProfileStore,
{
  let user_id = UserId::new(uid)?;

  let raw = if is_multipart(req.headers()) {
    read_form(Multipart::from_request(req, &()).await?).await?
  } else {
    let body = Bytes::from_request(req, &()).await?;
    parse_json::<RawProfileUpdate>(&body)?
  };

  let user = state
    .store
    .update_profile(user_id, raw.into_update())
    .await
    .map_err(ApiError::store("Error updating profile"))?
    .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

  Ok(Json(UserEnvelope {
    message: "Profile updated successfully",
    user:    UserSummary::new(user, None),
  }))
}

fn is_multipart(headers: &HeaderMap) -> bool {
  headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"))
}

/// Collect form parts into the same schema the JSON path uses. A
/// `profile_picture` part carrying a file is encoded inline as a data URL.
async fn read_form(mut form: Multipart) -> Result<RawProfileUpdate, ApiError> {
  let mut raw = RawProfileUpdate::default();

  while let Some(field) = form.next_field().await? {
    let Some(name) = field.name().map(str::to_owned) else {
      continue;
    };

    let is_upload = field.file_name().is_some()
      || field.content_type().is_some_and(|ct| ct.starts_with("image/"));

    if name == "profile_picture" && is_upload {
      let subtype = upload_subtype(field.content_type(), field.file_name());
      let bytes = field.bytes().await?;
      if bytes.is_empty() {
        tracing::warn!("ignoring empty profile_picture upload");
        continue;
      }
      raw.profile_picture =
        Some(EmbeddedImage::from_bytes(&subtype, &bytes).into_string());
      continue;
    }

    let text = field.text().await?;
    if !raw.set_text_field(&name, text) {
      tracing::debug!(field = %name, "ignoring unknown form field");
    }
  }

  Ok(raw)
}

fn upload_subtype(content_type: Option<&str>, file_name: Option<&str>) -> String {
  match (content_type, file_name) {
    (Some(ct), _) if ct.starts_with("image/") => subtype_for_mime(ct).to_owned(),
    (_, Some(name)) => subtype_for_path(FsPath::new(name)).to_owned(),
    _ => subtype_for_mime("").to_owned(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn upload_subtype_prefers_content_type() {
    assert_eq!(upload_subtype(Some("image/png"), Some("a.gif")), "png");
    assert_eq!(upload_subtype(Some("application/octet-stream"), Some("a.gif")), "gif");
    assert_eq!(upload_subtype(None, Some("a.webp")), "webp");
    assert_eq!(upload_subtype(None, None), "jpeg");
  }
}
