//! The `ProfileStore` trait.
//!
//! Implemented by storage backends (e.g. `casting-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  profile::RoleProfile,
  update::ProfileUpdate,
  user::{Registration, Role, User, UserId},
};

/// Outcome of [`ProfileStore::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
  pub user:    User,
  /// `true` if this call created the identity record.
  pub created: bool,
}

/// Abstraction over a profile store backend.
///
/// Both write operations are all-or-nothing: either every row they touch is
/// committed or none is.
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Create or update the identity record, then make sure a profile of the
  /// variant matching the registered role exists.
  ///
  /// On an existing record the name, email, and role are overwritten; the
  /// completeness flag only ever moves from `false` to `true` here. Profile
  /// rows of the other variant are left in place.
  fn register(
    &self,
    input: Registration,
  ) -> impl Future<Output = Result<Registered, Self::Error>> + Send + '_;

  /// Apply a partial update to the user and its role-matched profile,
  /// creating the profile if missing, and recompute completeness.
  ///
  /// Returns `None` if no user has this id.
  fn update_profile(
    &self,
    user_id: UserId,
    update: ProfileUpdate,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  fn get_user(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// The profile of the given variant for a user, if one has been created.
  fn get_role_profile(
    &self,
    user_id: UserId,
    role: Role,
  ) -> impl Future<Output = Result<Option<RoleProfile>, Self::Error>> + Send + '_;
}
