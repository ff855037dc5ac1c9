//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings and UUIDs hyphenated lowercase strings.
//! Enums are stored as their lowercase serde names.

use casting_core::{
  profile::{
    ActorProfile, Availability, FilmmakerProfile, ProfileCommon, RoleProfile,
  },
  user::{Role, User, UserId},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn decode_role(s: &str) -> Result<Role> { Ok(s.parse()?) }

pub fn decode_availability(s: &str) -> Result<Availability> {
  Availability::parse(s)
    .ok_or_else(|| Error::Decode(format!("unknown availability: {s:?}")))
}

pub fn decode_user_id(s: String) -> Result<UserId> { Ok(UserId::new(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub user_id:          String,
  pub display_name:     String,
  pub email:            String,
  pub role:             String,
  pub profile_complete: bool,
  pub registered_at:    String,
}

impl RawUser {
  pub const COLUMNS: &'static str =
    "user_id, display_name, email, role, profile_complete, registered_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:          row.get(0)?,
      display_name:     row.get(1)?,
      email:            row.get(2)?,
      role:             row.get(3)?,
      profile_complete: row.get(4)?,
      registered_at:    row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:          decode_user_id(self.user_id)?,
      display_name:     self.display_name,
      email:            self.email,
      role:             decode_role(&self.role)?,
      profile_complete: self.profile_complete,
      registered_at:    decode_dt(&self.registered_at)?,
    })
  }
}

/// Raw values of the columns both profile tables share, followed by the two
/// variant-specific columns.
pub struct RawProfile {
  pub profile_id:     String,
  pub user_id:        String,
  pub location:       String,
  pub embedded_image: Option<String>,
  pub availability:   String,
  pub created_at:     String,
  pub updated_at:     String,
  /// `bio` or `information`.
  pub text_a:         String,
  /// `skills` for actors; unused for filmmakers.
  pub text_b:         String,
  /// `movies_done` for filmmakers; unused for actors.
  pub count:          i64,
}

impl RawProfile {
  pub const ACTOR_SELECT: &'static str = "
    SELECT profile_id, user_id, location, embedded_image, availability,
           created_at, updated_at, bio, skills, 0
    FROM actor_profiles WHERE user_id = ?1";

  pub const FILMMAKER_SELECT: &'static str = "
    SELECT profile_id, user_id, location, embedded_image, availability,
           created_at, updated_at, information, '', movies_done
    FROM filmmaker_profiles WHERE user_id = ?1";

  pub fn select_for(role: Role) -> &'static str {
    match role {
      Role::Actor => Self::ACTOR_SELECT,
      Role::Filmmaker => Self::FILMMAKER_SELECT,
    }
  }

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      profile_id:     row.get(0)?,
      user_id:        row.get(1)?,
      location:       row.get(2)?,
      embedded_image: row.get(3)?,
      availability:   row.get(4)?,
      created_at:     row.get(5)?,
      updated_at:     row.get(6)?,
      text_a:         row.get(7)?,
      text_b:         row.get(8)?,
      count:          row.get(9)?,
    })
  }

  pub fn into_profile(self, role: Role) -> Result<RoleProfile> {
    let common = ProfileCommon {
      profile_id:     decode_uuid(&self.profile_id)?,
      user_id:        decode_user_id(self.user_id)?,
      location:       self.location,
      embedded_image: self.embedded_image,
      availability:   decode_availability(&self.availability)?,
      created_at:     decode_dt(&self.created_at)?,
      updated_at:     decode_dt(&self.updated_at)?,
    };

    Ok(match role {
      Role::Actor => RoleProfile::Actor(ActorProfile {
        common,
        bio: self.text_a,
        skills: self.text_b,
      }),
      Role::Filmmaker => RoleProfile::Filmmaker(FilmmakerProfile {
        common,
        information: self.text_a,
        movies_done: u32::try_from(self.count).map_err(|_| {
          Error::Decode(format!("movies_done out of range: {}", self.count))
        })?,
      }),
    })
  }
}
