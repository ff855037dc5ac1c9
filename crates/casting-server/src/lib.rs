//! HTTP server assembly for the casting profile backend.
//!
//! Wraps the [`casting_api`] router with request tracing and a body-size
//! limit and mounts it under `/api`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, extract::DefaultBodyLimit};
use casting_api::MediaRoot;
use casting_core::store::ProfileStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CASTING_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  pub media_dir:      PathBuf,
  /// Large enough for inline base64 images and multipart uploads.
  pub max_body_bytes: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           "127.0.0.1".to_string(),
      port:           8000,
      store_path:     PathBuf::from("casting.sqlite3"),
      media_dir:      PathBuf::from("media"),
      max_body_bytes: 10 * 1024 * 1024,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Resolve a leading `~/` in a configured path against `home`. Paths without
/// the prefix, or with no home directory known, come back unchanged.
pub fn expand_tilde(path: &Path, home: Option<&Path>) -> PathBuf {
  if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/"))
    && let Some(home) = home
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application: the API under `/api`, traced and
/// body-limited.
pub fn app<S>(store: Arc<S>, media: MediaRoot, config: &ServerConfig) -> Router
where
  S: ProfileStore + 'static,
{
  Router::new()
    .nest("/api", casting_api::api_router(store, media))
    .layer(DefaultBodyLimit::max(config.max_body_bytes))
    .layer(TraceLayer::new_for_http())
}
