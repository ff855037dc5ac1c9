//! Read models, assembled on demand from a user and its profile.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
  profile::{Availability, RoleProfile},
  user::{Role, User, UserId},
};

/// Role-specific profile fields. Keys that do not apply to the role are
/// omitted from the serialised form rather than sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bio:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub skills:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub information:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub movies_done:     Option<u32>,
  pub location:        String,
  pub availability:    Availability,
  /// Always a data URL when present.
  pub profile_picture: Option<String>,
}

impl ProfileFields {
  /// Project a profile, with `profile_picture` already resolved by the
  /// caller.
  pub fn new(profile: &RoleProfile, profile_picture: Option<String>) -> Self {
    let common = profile.common();
    let mut fields = Self {
      bio: None,
      skills: None,
      information: None,
      movies_done: None,
      location: common.location.clone(),
      availability: common.availability,
      profile_picture,
    };
    match profile {
      RoleProfile::Actor(p) => {
        fields.bio = Some(p.bio.clone());
        fields.skills = Some(p.skills.clone());
      }
      RoleProfile::Filmmaker(p) => {
        fields.information = Some(p.information.clone());
        fields.movies_done = Some(p.movies_done);
      }
    }
    fields
  }
}

/// The combined identity + profile view served by `GET /user/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
  pub user_id:             UserId,
  pub username:            String,
  pub email:               String,
  pub user_type:           Role,
  pub is_profile_complete: bool,
  pub date_joined:         DateTime<Utc>,
  pub profile:             ProfileFields,
  /// `false` when `profile` holds substituted defaults.
  #[serde(skip)]
  pub profile_stored:      bool,
}

impl ProfileView {
  /// Assemble the view. A missing profile row is replaced by an all-defaults
  /// profile of the user's variant; it is not an error.
  pub fn assemble(
    user: User,
    profile: Option<RoleProfile>,
    profile_picture: Option<String>,
  ) -> Self {
    let profile_stored = profile.is_some();
    let profile = profile.unwrap_or_else(|| {
      RoleProfile::empty(user.role, user.user_id.clone(), user.registered_at)
    });

    Self {
      profile: ProfileFields::new(&profile, profile_picture),
      user_id: user.user_id,
      username: user.display_name,
      email: user.email,
      user_type: user.role,
      is_profile_complete: user.profile_complete,
      date_joined: user.registered_at,
      profile_stored,
    }
  }
}

/// The flat card served by `GET /users/profile/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
  pub name:      String,
  pub email:     String,
  pub user_type: Role,
  #[serde(flatten)]
  pub profile:   ProfileFields,
}

impl From<ProfileView> for ProfileCard {
  fn from(view: ProfileView) -> Self {
    Self {
      name:      view.username,
      email:     view.email,
      user_type: view.user_type,
      profile:   view.profile,
    }
  }
}
