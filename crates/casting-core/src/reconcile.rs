//! Pure reconciliation rules applied by stores inside their write
//! transactions.
//!
//! Registration and profile updates use different completeness rules:
//! registration can only latch the flag on from a client hint, while
//! [`apply_update`] derives it from the stored fields and may turn it off.

use chrono::{DateTime, Utc};

use crate::{
  profile::RoleProfile,
  update::ProfileUpdate,
  user::{Registration, User},
};

// ─── Registration ────────────────────────────────────────────────────────────

/// The record a first registration creates.
pub fn new_user(reg: &Registration, now: DateTime<Utc>) -> User {
  User {
    user_id:          reg.user_id.clone(),
    display_name:     reg.display_name.clone(),
    email:            reg.email.clone(),
    role:             reg.role,
    profile_complete: reg.profile_complete_hint.unwrap_or(false),
    registered_at:    now,
  }
}

/// Merge a repeat registration into an existing record. Returns whether
/// anything changed.
pub fn merge_registration(user: &mut User, reg: &Registration) -> bool {
  let before = user.clone();

  user.display_name = reg.display_name.clone();
  user.email = reg.email.clone();
  user.role = reg.role;
  if reg.profile_complete_hint == Some(true) {
    user.profile_complete = true;
  }

  *user != before
}

// ─── Profile updates ─────────────────────────────────────────────────────────

/// Which records an [`apply_update`] call touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Applied {
  pub user_changed:    bool,
  pub profile_changed: bool,
}

/// Apply a partial update to a user and its role-matched profile, then
/// recompute the completeness flag.
///
/// Keys absent from `update` leave the corresponding field untouched. Keys
/// that belong to the other role variant are ignored.
pub fn apply_update(
  user: &mut User,
  profile: &mut RoleProfile,
  update: ProfileUpdate,
  now: DateTime<Utc>,
) -> Applied {
  debug_assert_eq!(user.role, profile.role());

  let mut applied = Applied::default();

  applied.user_changed |= assign(&mut user.display_name, update.username);
  applied.user_changed |= assign(&mut user.email, update.email);

  let common = profile.common_mut();
  applied.profile_changed |= assign(&mut common.location, update.location);
  if let Some(image) = update.profile_picture {
    applied.profile_changed |=
      assign_opt(&mut common.embedded_image, image.into_string());
  }
  if let Some(availability) = update.availability
    && common.availability != availability
  {
    common.availability = availability;
    applied.profile_changed = true;
  }

  match profile {
    RoleProfile::Actor(p) => {
      applied.profile_changed |= assign(&mut p.bio, update.bio);
      applied.profile_changed |= assign(&mut p.skills, update.skills);
      ignore_foreign("information", update.information.is_some());
      ignore_foreign("movies_done", update.movies_done.is_some());
    }
    RoleProfile::Filmmaker(p) => {
      applied.profile_changed |= assign(&mut p.information, update.information);
      if let Some(n) = update.movies_done
        && p.movies_done != n
      {
        p.movies_done = n;
        applied.profile_changed = true;
      }
      ignore_foreign("bio", update.bio.is_some());
      ignore_foreign("skills", update.skills.is_some());
    }
  }

  if applied.profile_changed {
    profile.common_mut().updated_at = now;
  }

  let complete = is_complete(user, profile);
  if complete != user.profile_complete {
    user.profile_complete = complete;
    applied.user_changed = true;
  }

  applied
}

/// A profile is complete once it has a description, a location, a display
/// name, and an email.
pub fn is_complete(user: &User, profile: &RoleProfile) -> bool {
  !profile.description().trim().is_empty()
    && !profile.common().location.trim().is_empty()
    && !user.display_name.trim().is_empty()
    && !user.email.trim().is_empty()
}

fn assign(field: &mut String, value: Option<String>) -> bool {
  match value {
    Some(v) if *field != v => {
      *field = v;
      true
    }
    _ => false,
  }
}

fn assign_opt(field: &mut Option<String>, value: String) -> bool {
  if field.as_deref() == Some(value.as_str()) {
    return false;
  }
  *field = Some(value);
  true
}

fn ignore_foreign(key: &str, present: bool) {
  if present {
    tracing::warn!(key, "ignoring field that does not apply to this role");
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::{
    image::EmbeddedImage,
    profile::Availability,
    user::{Role, UserId},
  };

  fn ts(secs: i64) -> DateTime<Utc> { Utc.timestamp_opt(secs, 0).unwrap() }

  fn registration(role: Role, hint: Option<bool>) -> Registration {
    Registration {
      user_id: UserId::new("u1").unwrap(),
      display_name: "Al".into(),
      email: "a@x.com".into(),
      role,
      profile_complete_hint: hint,
    }
  }

  fn actor() -> (User, RoleProfile) {
    let user = new_user(&registration(Role::Actor, None), ts(0));
    let profile = RoleProfile::empty(Role::Actor, user.user_id.clone(), ts(0));
    (user, profile)
  }

  #[test]
  fn new_user_takes_hint() {
    assert!(!new_user(&registration(Role::Actor, None), ts(0)).profile_complete);
    assert!(new_user(&registration(Role::Actor, Some(true)), ts(0)).profile_complete);
  }

  #[test]
  fn merge_never_clears_completeness() {
    let mut user = new_user(&registration(Role::Actor, Some(true)), ts(0));
    let changed = merge_registration(&mut user, &registration(Role::Actor, Some(false)));
    assert!(!changed);
    assert!(user.profile_complete);
  }

  #[test]
  fn merge_overwrites_identity_fields() {
    let mut user = new_user(&registration(Role::Actor, None), ts(0));
    let mut reg = registration(Role::Filmmaker, None);
    reg.email = "b@x.com".into();
    assert!(merge_registration(&mut user, &reg));
    assert_eq!(user.email, "b@x.com");
    assert_eq!(user.role, Role::Filmmaker);
    assert_eq!(user.registered_at, ts(0));
  }

  #[test]
  fn partial_update_leaves_other_fields_alone() {
    let (mut user, mut profile) = actor();
    if let RoleProfile::Actor(p) = &mut profile {
      p.bio = "bio".into();
      p.skills = "fencing".into();
    }
    let before_user = user.clone();

    let applied = apply_update(
      &mut user,
      &mut profile,
      ProfileUpdate { location: Some("X".into()), ..Default::default() },
      ts(5),
    );

    assert!(applied.profile_changed);
    let RoleProfile::Actor(p) = &profile else { unreachable!() };
    assert_eq!(p.bio, "bio");
    assert_eq!(p.skills, "fencing");
    assert_eq!(p.common.location, "X");
    assert_eq!(p.common.updated_at, ts(5));
    assert_eq!(user.display_name, before_user.display_name);
    assert_eq!(user.email, before_user.email);
  }

  #[test]
  fn completeness_is_recomputed_both_ways() {
    let (mut user, mut profile) = actor();
    apply_update(
      &mut user,
      &mut profile,
      ProfileUpdate {
        bio: Some("bio".into()),
        location: Some("Lagos".into()),
        ..Default::default()
      },
      ts(1),
    );
    assert!(user.profile_complete);

    // Registration latched the flag but fields are still empty.
    let mut user = new_user(&registration(Role::Actor, Some(true)), ts(0));
    let mut profile = RoleProfile::empty(Role::Actor, user.user_id.clone(), ts(0));
    let applied = apply_update(
      &mut user,
      &mut profile,
      ProfileUpdate {
        availability: Some(Availability::Yes),
        ..Default::default()
      },
      ts(1),
    );
    assert!(applied.user_changed);
    assert!(!user.profile_complete);
  }

  #[test]
  fn filmmaker_uses_information_and_ignores_actor_fields() {
    let reg = registration(Role::Filmmaker, None);
    let mut user = new_user(&reg, ts(0));
    let mut profile = RoleProfile::empty(Role::Filmmaker, user.user_id.clone(), ts(0));

    apply_update(
      &mut user,
      &mut profile,
      ProfileUpdate {
        bio: Some("ignored".into()),
        skills: Some("ignored".into()),
        information: Some("Director".into()),
        location: Some("Accra".into()),
        movies_done: Some(7),
        ..Default::default()
      },
      ts(1),
    );

    let RoleProfile::Filmmaker(p) = &profile else { unreachable!() };
    assert_eq!(p.information, "Director");
    assert_eq!(p.movies_done, 7);
    assert!(user.profile_complete);
  }

  #[test]
  fn unchanged_values_are_not_reported() {
    let (mut user, mut profile) = actor();
    let image = EmbeddedImage::parse("data:image/png;base64,AAA=").unwrap();
    let update = ProfileUpdate {
      profile_picture: Some(image),
      availability: Some(Availability::No),
      ..Default::default()
    };
    let first = apply_update(&mut user, &mut profile, update.clone(), ts(1));
    assert!(first.profile_changed);
    let second = apply_update(&mut user, &mut profile, update, ts(2));
    assert_eq!(second, Applied::default());
    assert_eq!(profile.common().updated_at, ts(1));
  }
}
