//! Resolution of stored profile images into data URLs.
//!
//! Inline data URLs pass through untouched, even ones that do not parse as
//! `data:image/...;base64,` (those are logged). Media-relative references are
//! read from disk and re-encoded; failures there are logged and yield `None`.
//! A missing picture never fails a read.

use std::path::{Component, Path, PathBuf};

use casting_core::image::{EmbeddedImage, StoredImage, subtype_for_path};

/// Root directory that stored image references are relative to.
#[derive(Debug, Clone)]
pub struct MediaRoot {
  dir: PathBuf,
}

impl MediaRoot {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

  pub fn dir(&self) -> &Path { &self.dir }

  /// Turn a stored `embedded_image` value into a data URL.
  pub async fn resolve(&self, stored: Option<&str>) -> Option<String> {
    let stored = stored.filter(|s| !s.is_empty())?;

    match StoredImage::classify(stored) {
      StoredImage::Inline(url) => {
        if let Err(e) = EmbeddedImage::parse(url) {
          tracing::warn!(error = %e, "serving malformed stored data URL as-is");
        }
        Some(url.to_owned())
      }
      StoredImage::Reference(rel) => self.read_reference(rel).await,
    }
  }

  async fn read_reference(&self, rel: &str) -> Option<String> {
    let rel_path = Path::new(rel);
    let escapes = rel_path
      .components()
      .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
      tracing::warn!(reference = rel, "refusing image reference outside media root");
      return None;
    }

    match tokio::fs::read(self.dir.join(rel_path)).await {
      Ok(bytes) => {
        Some(EmbeddedImage::from_bytes(subtype_for_path(rel_path), &bytes).into_string())
      }
      Err(e) => {
        tracing::warn!(reference = rel, error = %e, "unreadable stored image");
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_media() -> MediaRoot {
    let dir = std::env::temp_dir().join(format!("casting-media-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(dir.join("headshots")).unwrap();
    MediaRoot::new(dir)
  }

  #[tokio::test]
  async fn inline_urls_pass_through() {
    let media = temp_media();
    let url = "data:image/png;base64,AAA=";
    assert_eq!(media.resolve(Some(url)).await.as_deref(), Some(url));
  }

  #[tokio::test]
  async fn empty_or_missing_is_none() {
    let media = temp_media();
    assert_eq!(media.resolve(None).await, None);
    assert_eq!(media.resolve(Some("")).await, None);
  }

  #[tokio::test]
  async fn nonconforming_inline_passes_through() {
    let media = temp_media();
    let url = "data:text/plain;base64,AAA=";
    assert_eq!(media.resolve(Some(url)).await.as_deref(), Some(url));
  }

  #[tokio::test]
  async fn references_are_read_and_encoded() {
    let media = temp_media();
    std::fs::write(media.dir().join("headshots/a.png"), b"hi").unwrap();
    std::fs::write(media.dir().join("headshots/b"), b"hi").unwrap();

    assert_eq!(
      media.resolve(Some("headshots/a.png")).await.as_deref(),
      Some("data:image/png;base64,aGk=")
    );
    assert_eq!(
      media.resolve(Some("headshots/b")).await.as_deref(),
      Some("data:image/jpeg;base64,aGk=")
    );
  }

  #[tokio::test]
  async fn unreadable_or_escaping_references_are_none() {
    let media = temp_media();
    assert_eq!(media.resolve(Some("headshots/missing.jpg")).await, None);
    assert_eq!(media.resolve(Some("../etc/passwd")).await, None);
    assert_eq!(media.resolve(Some("/etc/passwd")).await, None);
  }
}
