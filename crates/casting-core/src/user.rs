//! Identity records, one per externally issued user identifier.
//!
//! The identifier is minted by the identity provider; this service never
//! generates one. The record carries the role tag that decides which profile
//! variant applies, plus the derived completeness flag.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── UserId ──────────────────────────────────────────────────────────────────

/// Opaque identifier issued by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
  /// Wrap a raw identifier, rejecting blank strings.
  pub fn new(raw: impl Into<String>) -> Result<Self> {
    let raw = raw.into();
    if raw.trim().is_empty() {
      return Err(Error::Validation("user id must not be empty".into()));
    }
    Ok(Self(raw))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Role ────────────────────────────────────────────────────────────────────

/// Which side of the platform a user is on. Decides the profile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Actor,
  Filmmaker,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Actor => "actor",
      Self::Filmmaker => "filmmaker",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Role {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "actor" => Ok(Self::Actor),
      "filmmaker" => Ok(Self::Filmmaker),
      other => Err(Error::UnknownRole(other.to_owned())),
    }
  }
}

// ─── User ────────────────────────────────────────────────────────────────────

/// The root identity record. Profile rows hang off it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:          UserId,
  pub display_name:     String,
  /// Globally unique; enforced by the store.
  pub email:            String,
  pub role:             Role,
  pub profile_complete: bool,
  /// Set once on first registration.
  pub registered_at:    DateTime<Utc>,
}

// ─── Registration ────────────────────────────────────────────────────────────

/// Validated input to [`crate::store::ProfileStore::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
  pub user_id:               UserId,
  pub display_name:          String,
  pub email:                 String,
  pub role:                  Role,
  pub profile_complete_hint: Option<bool>,
}

impl Registration {
  /// Build a registration from loosely typed request fields.
  ///
  /// Every field except the hint is required and must be non-blank; the role
  /// must be one of the two recognised values.
  pub fn from_parts(
    user_id: Option<String>,
    display_name: Option<String>,
    email: Option<String>,
    role: Option<String>,
    profile_complete_hint: Option<bool>,
  ) -> Result<Self> {
    let (Some(user_id), Some(display_name), Some(email), Some(role)) = (
      non_blank(user_id),
      non_blank(display_name),
      non_blank(email),
      non_blank(role),
    ) else {
      return Err(Error::Validation(
        "Missing required fields (uid, username, email, user_type)".into(),
      ));
    };

    Ok(Self {
      user_id: UserId::new(user_id)?,
      display_name,
      email,
      role: role.parse()?,
      profile_complete_hint,
    })
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}
