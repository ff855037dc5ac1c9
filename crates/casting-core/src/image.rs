//! Embedded profile images.
//!
//! Pictures are stored inline as `data:image/<subtype>;base64,<payload>`
//! strings. Older rows may instead hold a path relative to the media
//! directory; [`StoredImage::classify`] tells the two apart so the read side
//! can re-encode referenced files.

use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const DATA_URL_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";
const DEFAULT_SUBTYPE: &str = "jpeg";

// ─── EmbeddedImage ───────────────────────────────────────────────────────────

/// A validated `data:image/...;base64,...` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddedImage(String);

impl EmbeddedImage {
  /// Accept a data URL as-is if it has the expected shape. The payload is
  /// kept byte-for-byte so reads return exactly what was written.
  pub fn parse(s: &str) -> Result<Self> {
    let rest = s
      .strip_prefix(DATA_URL_PREFIX)
      .ok_or_else(|| malformed("missing data:image/ prefix"))?;
    let (subtype, payload) = rest
      .split_once(BASE64_MARKER)
      .ok_or_else(|| malformed("missing ;base64, marker"))?;

    if subtype.is_empty() || !subtype.chars().all(is_subtype_char) {
      return Err(malformed("invalid image subtype"));
    }
    if payload.is_empty() {
      return Err(malformed("empty payload"));
    }

    Ok(Self(s.to_owned()))
  }

  /// Encode raw image bytes.
  pub fn from_bytes(subtype: &str, bytes: &[u8]) -> Self {
    let subtype = if !subtype.is_empty() && subtype.chars().all(is_subtype_char)
    {
      subtype
    } else {
      DEFAULT_SUBTYPE
    };
    Self(format!("{DATA_URL_PREFIX}{subtype}{BASE64_MARKER}{}", B64.encode(bytes)))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_string(self) -> String { self.0 }
}

fn is_subtype_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

fn malformed(reason: &str) -> Error { Error::MalformedEncoding(reason.to_owned()) }

// ─── Subtype inference ───────────────────────────────────────────────────────

/// `image/png` → `png`. Anything that is not an `image/*` MIME type falls back
/// to `jpeg`.
pub fn subtype_for_mime(mime: &str) -> &str {
  let essence = mime.split(';').next().unwrap_or_default().trim();
  match essence.strip_prefix("image/") {
    Some(sub) if !sub.is_empty() && sub.chars().all(is_subtype_char) => sub,
    _ => DEFAULT_SUBTYPE,
  }
}

/// Infer the subtype from a file extension, defaulting to `jpeg`.
pub fn subtype_for_path(path: &Path) -> &'static str {
  let ext = path
    .extension()
    .and_then(|e| e.to_str())
    .map(str::to_ascii_lowercase);
  match ext.as_deref() {
    Some("png") => "png",
    Some("gif") => "gif",
    Some("webp") => "webp",
    Some("bmp") => "bmp",
    Some("svg") => "svg+xml",
    _ => DEFAULT_SUBTYPE,
  }
}

// ─── StoredImage ─────────────────────────────────────────────────────────────

/// The two shapes an `embedded_image` column can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredImage<'a> {
  /// Starts with `data:`; may still turn out malformed.
  Inline(&'a str),
  /// A path relative to the media directory.
  Reference(&'a str),
}

impl<'a> StoredImage<'a> {
  pub fn classify(stored: &'a str) -> Self {
    if stored.starts_with("data:") {
      Self::Inline(stored)
    } else {
      Self::Reference(stored)
    }
  }
}
