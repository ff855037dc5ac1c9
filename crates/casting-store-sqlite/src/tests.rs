//! Integration tests for `SqliteStore` against an in-memory database.

use casting_core::{
  image::EmbeddedImage,
  profile::{Availability, RoleProfile},
  store::ProfileStore,
  update::ProfileUpdate,
  user::{Registration, Role, UserId},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn uid(s: &str) -> UserId { UserId::new(s).unwrap() }

fn registration(id: &str, email: &str, role: Role) -> Registration {
  Registration {
    user_id: uid(id),
    display_name: "Al".into(),
    email: email.into(),
    role,
    profile_complete_hint: None,
  }
}

// ─── Registration ────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_is_idempotent() {
  let s = store().await;
  let reg = registration("u1", "a@x.com", Role::Actor);

  let first = s.register(reg.clone()).await.unwrap();
  assert!(first.created);
  let second = s.register(reg).await.unwrap();
  assert!(!second.created);

  assert_eq!(first.user, second.user);
  assert_eq!(s.get_user(uid("u1")).await.unwrap(), Some(first.user));
  assert_eq!(s.profile_rows(&uid("u1"), Role::Actor).await.unwrap(), 1);
}

#[tokio::test]
async fn register_creates_only_matching_variant() {
  let s = store().await;
  s.register(registration("a", "a@x.com", Role::Actor)).await.unwrap();
  s.register(registration("f", "f@x.com", Role::Filmmaker)).await.unwrap();

  assert_eq!(s.profile_rows(&uid("a"), Role::Actor).await.unwrap(), 1);
  assert_eq!(s.profile_rows(&uid("a"), Role::Filmmaker).await.unwrap(), 0);
  assert_eq!(s.profile_rows(&uid("f"), Role::Filmmaker).await.unwrap(), 1);
  assert_eq!(s.profile_rows(&uid("f"), Role::Actor).await.unwrap(), 0);

  let profile = s.get_role_profile(uid("f"), Role::Filmmaker).await.unwrap();
  let Some(RoleProfile::Filmmaker(p)) = profile else { panic!("expected filmmaker profile") };
  assert_eq!(p.movies_done, 0);
  assert_eq!(p.common.availability, Availability::No);
  assert_eq!(p.common.embedded_image, None);
}

#[tokio::test]
async fn reregistration_overwrites_email() {
  let s = store().await;
  s.register(registration("u1", "a@x.com", Role::Actor)).await.unwrap();
  let again = s
    .register(registration("u1", "b@x.com", Role::Actor))
    .await
    .unwrap();

  assert!(!again.created);
  let stored = s.get_user(uid("u1")).await.unwrap().unwrap();
  assert_eq!(stored.email, "b@x.com");
}

#[tokio::test]
async fn role_change_keeps_stale_variant() {
  let s = store().await;
  s.register(registration("u1", "a@x.com", Role::Actor)).await.unwrap();
  s.register(registration("u1", "a@x.com", Role::Filmmaker)).await.unwrap();

  let user = s.get_user(uid("u1")).await.unwrap().unwrap();
  assert_eq!(user.role, Role::Filmmaker);
  assert_eq!(s.profile_rows(&uid("u1"), Role::Filmmaker).await.unwrap(), 1);
  assert_eq!(s.profile_rows(&uid("u1"), Role::Actor).await.unwrap(), 1);
}

#[tokio::test]
async fn completeness_hint_only_latches_on() {
  let s = store().await;
  let mut reg = registration("u1", "a@x.com", Role::Actor);
  reg.profile_complete_hint = Some(true);
  assert!(s.register(reg.clone()).await.unwrap().user.profile_complete);

  reg.profile_complete_hint = Some(false);
  assert!(s.register(reg).await.unwrap().user.profile_complete);
}

#[tokio::test]
async fn duplicate_email_fails_without_partial_state() {
  let s = store().await;
  s.register(registration("u1", "a@x.com", Role::Actor)).await.unwrap();

  let err = s.register(registration("u2", "a@x.com", Role::Filmmaker)).await;
  assert!(matches!(err, Err(crate::Error::Database(_))), "got {err:?}");

  assert_eq!(s.get_user(uid("u2")).await.unwrap(), None);
  assert_eq!(s.profile_rows(&uid("u2"), Role::Filmmaker).await.unwrap(), 0);
}

// ─── Profile updates ─────────────────────────────────────────────────────────

#[tokio::test]
async fn update_unknown_user_returns_none() {
  let s = store().await;
  let result = s
    .update_profile(uid("ghost"), ProfileUpdate::default())
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn partial_update_touches_only_given_fields() {
  let s = store().await;
  s.register(registration("u1", "a@x.com", Role::Actor)).await.unwrap();
  s.update_profile(uid("u1"), ProfileUpdate {
    bio: Some("Trained at RADA".into()),
    skills: Some("Fencing".into()),
    availability: Some(Availability::Yes),
    ..Default::default()
  })
  .await
  .unwrap();
  let before = s.get_role_profile(uid("u1"), Role::Actor).await.unwrap().unwrap();

  s.update_profile(uid("u1"), ProfileUpdate {
    location: Some("X".into()),
    ..Default::default()
  })
  .await
  .unwrap();
  let after = s.get_role_profile(uid("u1"), Role::Actor).await.unwrap().unwrap();

  let (RoleProfile::Actor(b), RoleProfile::Actor(a)) = (before, after) else {
    panic!("expected actor profiles");
  };
  assert_eq!(a.bio, b.bio);
  assert_eq!(a.skills, b.skills);
  assert_eq!(a.common.availability, Availability::Yes);
  assert_eq!(a.common.profile_id, b.common.profile_id);
  assert_eq!(a.common.location, "X");
}

#[tokio::test]
async fn update_recomputes_completeness() {
  let s = store().await;
  let mut reg = registration("u1", "a@x.com", Role::Filmmaker);
  reg.profile_complete_hint = Some(true);
  s.register(reg).await.unwrap();

  // The latched flag is re-derived from the (still empty) fields.
  let user = s
    .update_profile(uid("u1"), ProfileUpdate {
      movies_done: Some(3),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert!(!user.profile_complete);

  let user = s
    .update_profile(uid("u1"), ProfileUpdate {
      information: Some("Documentaries".into()),
      location: Some("Nairobi".into()),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert!(user.profile_complete);
  assert_eq!(s.get_user(uid("u1")).await.unwrap(), Some(user));
}

#[tokio::test]
async fn role_flip_back_reuses_earlier_profile() {
  let s = store().await;
  s.register(registration("u1", "a@x.com", Role::Actor)).await.unwrap();
  s.update_profile(uid("u1"), ProfileUpdate {
    skills: Some("Stage combat".into()),
    ..Default::default()
  })
  .await
  .unwrap();
  let original = s.get_role_profile(uid("u1"), Role::Actor).await.unwrap().unwrap();

  s.register(registration("u1", "a@x.com", Role::Filmmaker)).await.unwrap();
  s.update_profile(uid("u1"), ProfileUpdate {
    information: Some("Shorts".into()),
    skills: Some("ignored for filmmakers".into()),
    ..Default::default()
  })
  .await
  .unwrap();

  s.register(registration("u1", "a@x.com", Role::Actor)).await.unwrap();
  let reused = s.get_role_profile(uid("u1"), Role::Actor).await.unwrap().unwrap();
  assert_eq!(reused, original);
  assert_eq!(s.profile_rows(&uid("u1"), Role::Actor).await.unwrap(), 1);
}

#[tokio::test]
async fn failed_update_rolls_back_every_field() {
  let s = store().await;
  s.register(registration("u1", "a@x.com", Role::Actor)).await.unwrap();
  s.register(registration("u2", "b@x.com", Role::Actor)).await.unwrap();

  let err = s
    .update_profile(uid("u2"), ProfileUpdate {
      email: Some("a@x.com".into()),
      bio: Some("should not stick".into()),
      location: Some("Paris".into()),
      ..Default::default()
    })
    .await;
  assert!(err.is_err());

  let user = s.get_user(uid("u2")).await.unwrap().unwrap();
  assert_eq!(user.email, "b@x.com");
  let Some(RoleProfile::Actor(p)) =
    s.get_role_profile(uid("u2"), Role::Actor).await.unwrap()
  else {
    panic!("expected actor profile");
  };
  assert_eq!(p.bio, "");
  assert_eq!(p.common.location, "");
}

#[tokio::test]
async fn embedded_image_round_trips_unchanged() {
  let s = store().await;
  s.register(registration("u1", "a@x.com", Role::Actor)).await.unwrap();
  let image = "data:image/png;base64,AAA=";

  s.update_profile(uid("u1"), ProfileUpdate {
    profile_picture: Some(EmbeddedImage::parse(image).unwrap()),
    ..Default::default()
  })
  .await
  .unwrap();

  let profile = s.get_role_profile(uid("u1"), Role::Actor).await.unwrap().unwrap();
  assert_eq!(profile.common().embedded_image.as_deref(), Some(image));
}

#[tokio::test]
async fn raw_image_column_is_returned_verbatim() {
  let s = store().await;
  s.register(registration("u1", "a@x.com", Role::Actor)).await.unwrap();
  s.set_raw_image(&uid("u1"), Role::Actor, "headshots/u1.png").await.unwrap();

  let profile = s.get_role_profile(uid("u1"), Role::Actor).await.unwrap().unwrap();
  assert_eq!(profile.common().embedded_image.as_deref(), Some("headshots/u1.png"));
}
