//! Role profiles: the role-specific extension of a [`User`](crate::user::User).
//!
//! A user has at most one live profile, of the variant matching its role.
//! Modelling the profile as a sum type means a caller can never hold an actor
//! user together with filmmaker fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::{Role, UserId};

// ─── Availability ────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
  Yes,
  #[default]
  No,
}

impl Availability {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Yes => "yes",
      Self::No => "no",
    }
  }

  /// Strict parse: only the exact strings `"yes"` and `"no"`.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "yes" => Some(Self::Yes),
      "no" => Some(Self::No),
      _ => None,
    }
  }
}

// ─── Shared fields ───────────────────────────────────────────────────────────

/// Fields every profile variant carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCommon {
  pub profile_id:     Uuid,
  pub user_id:        UserId,
  pub location:       String,
  /// Either an inline `data:image/...` URL or a media-relative reference.
  pub embedded_image: Option<String>,
  pub availability:   Availability,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

impl ProfileCommon {
  fn empty(user_id: UserId, now: DateTime<Utc>) -> Self {
    Self {
      profile_id: Uuid::new_v4(),
      user_id,
      location: String::new(),
      embedded_image: None,
      availability: Availability::default(),
      created_at: now,
      updated_at: now,
    }
  }
}

// ─── Variants ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorProfile {
  pub common: ProfileCommon,
  pub bio:    String,
  pub skills: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmmakerProfile {
  pub common:      ProfileCommon,
  pub information: String,
  pub movies_done: u32,
}

/// The profile of a user, tagged by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
  Actor(ActorProfile),
  Filmmaker(FilmmakerProfile),
}

impl RoleProfile {
  /// A fresh profile with every field at its default, as created lazily on
  /// registration or first update.
  pub fn empty(role: Role, user_id: UserId, now: DateTime<Utc>) -> Self {
    let common = ProfileCommon::empty(user_id, now);
    match role {
      Role::Actor => Self::Actor(ActorProfile {
        common,
        bio: String::new(),
        skills: String::new(),
      }),
      Role::Filmmaker => Self::Filmmaker(FilmmakerProfile {
        common,
        information: String::new(),
        movies_done: 0,
      }),
    }
  }

  pub fn role(&self) -> Role {
    match self {
      Self::Actor(_) => Role::Actor,
      Self::Filmmaker(_) => Role::Filmmaker,
    }
  }

  pub fn common(&self) -> &ProfileCommon {
    match self {
      Self::Actor(p) => &p.common,
      Self::Filmmaker(p) => &p.common,
    }
  }

  pub fn common_mut(&mut self) -> &mut ProfileCommon {
    match self {
      Self::Actor(p) => &mut p.common,
      Self::Filmmaker(p) => &mut p.common,
    }
  }

  /// The free-text description that counts towards completeness: `bio` for
  /// actors, `information` for filmmakers.
  pub fn description(&self) -> &str {
    match self {
      Self::Actor(p) => &p.bio,
      Self::Filmmaker(p) => &p.information,
    }
  }
}
