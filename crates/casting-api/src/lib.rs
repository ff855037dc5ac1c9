//! JSON REST API for the casting profile backend.
//!
//! Exposes an axum [`Router`] backed by any
//! [`casting_core::store::ProfileStore`]. Identity is issued upstream; auth,
//! TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", casting_api::api_router(store.clone(), media))
//! ```
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/register` | 201 on create, 200 on update |
//! | `GET`  | `/user/{uid}` | Identity + role profile, defaults if no profile row |
//! | `GET`  | `/users/profile/{uid}` | Flat profile card; 404 if no profile row |
//! | `PUT`  | `/users/profile/{uid}` | JSON or `multipart/form-data` partial update |
//! | `POST` | `/avatar/store/` | 501 |
//! | `GET`  | `/avatar/get/{uid}` | 501 |
//! | `POST` | `/avatar/match/` | 501 |

pub mod avatar;
pub mod error;
pub mod media;
pub mod profile;
pub mod projection;
pub mod register;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use casting_core::store::ProfileStore;
use serde::de::DeserializeOwned;

pub use error::ApiError;
pub use media::MediaRoot;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store: Arc<S>,
  pub media: Arc<MediaRoot>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
      media: Arc::clone(&self.media),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, media: MediaRoot) -> Router<()>
where
  S: ProfileStore + 'static,
{
  let state = ApiState { store, media: Arc::new(media) };

  Router::new()
    .route("/register", post(register::handler::<S>))
    .route("/user/{uid}", get(users::get_one::<S>))
    .route(
      "/users/profile/{uid}",
      get(profile::get_card::<S>).put(profile::update::<S>),
    )
    .route("/avatar/store/", post(avatar::store))
    .route("/avatar/get/{uid}", get(avatar::get_one))
    .route("/avatar/match/", post(avatar::find_match))
    .with_state(state)
}

// ─── Body parsing ────────────────────────────────────────────────────────────

/// Parse a JSON body. Any syntax or type error is a 400, never axum's 422.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
  serde_json::from_slice(body).map_err(|e| {
    tracing::warn!(error = %e, "invalid JSON body");
    ApiError::BadRequest("Invalid JSON".into())
  })
}
