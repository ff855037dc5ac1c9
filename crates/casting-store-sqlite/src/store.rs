//! [`SqliteStore`]: the SQLite implementation of [`ProfileStore`].

use std::path::Path;

use casting_core::{
  profile::RoleProfile,
  reconcile,
  store::{ProfileStore, Registered},
  update::ProfileUpdate,
  user::{Registration, Role, User, UserId},
};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension as _, params};

use crate::{
  Result,
  encode::{RawProfile, RawUser, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A profile store backed by a single SQLite file.
///
/// Cloning shares the inner connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of profile rows of `role` held for a user. At most one, thanks
  /// to the `UNIQUE (user_id)` constraint.
  #[cfg(test)]
  pub(crate) async fn profile_rows(&self, user_id: &UserId, role: Role) -> Result<i64> {
    let id = user_id.as_str().to_owned();
    let sql = format!("SELECT COUNT(*) FROM {} WHERE user_id = ?1", profile_table(role));
    Ok(
      self
        .conn
        .call(move |conn| Ok(conn.query_row(&sql, params![id], |r| r.get(0))?))
        .await?,
    )
  }

  /// Overwrite the stored image column directly, bypassing validation.
  #[cfg(test)]
  pub(crate) async fn set_raw_image(&self, user_id: &UserId, role: Role, raw: &str) -> Result<()> {
    let id = user_id.as_str().to_owned();
    let raw = raw.to_owned();
    let sql = format!("UPDATE {} SET embedded_image = ?1 WHERE user_id = ?2", profile_table(role));
    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, params![raw, id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row helpers (run on the connection thread) ─────────────────────────────

fn profile_table(role: Role) -> &'static str {
  match role {
    Role::Actor => "actor_profiles",
    Role::Filmmaker => "filmmaker_profiles",
  }
}

fn load_user(conn: &Connection, user_id: &UserId) -> Result<Option<User>> {
  let sql = format!("SELECT {} FROM users WHERE user_id = ?1", RawUser::COLUMNS);
  conn
    .query_row(&sql, params![user_id.as_str()], RawUser::from_row)
    .optional()?
    .map(RawUser::into_user)
    .transpose()
}

fn load_profile(
  conn: &Connection,
  user_id: &UserId,
  role: Role,
) -> Result<Option<RoleProfile>> {
  conn
    .query_row(
      RawProfile::select_for(role),
      params![user_id.as_str()],
      RawProfile::from_row,
    )
    .optional()?
    .map(|raw| raw.into_profile(role))
    .transpose()
}

fn insert_user(conn: &Connection, user: &User) -> Result<()> {
  conn.execute(
    "INSERT INTO users (
       user_id, display_name, email, role, profile_complete, registered_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    params![
      user.user_id.as_str(),
      user.display_name,
      user.email,
      user.role.as_str(),
      user.profile_complete,
      encode_dt(user.registered_at),
    ],
  )?;
  Ok(())
}

fn update_user(conn: &Connection, user: &User) -> Result<()> {
  conn.execute(
    "UPDATE users
     SET display_name = ?2, email = ?3, role = ?4, profile_complete = ?5
     WHERE user_id = ?1",
    params![
      user.user_id.as_str(),
      user.display_name,
      user.email,
      user.role.as_str(),
      user.profile_complete,
    ],
  )?;
  Ok(())
}

fn insert_profile(conn: &Connection, profile: &RoleProfile) -> Result<()> {
  let c = profile.common();
  let (profile_id, user_id) = (encode_uuid(c.profile_id), c.user_id.as_str());
  let (created_at, updated_at) = (encode_dt(c.created_at), encode_dt(c.updated_at));
  let availability = c.availability.as_str();

  match profile {
    RoleProfile::Actor(p) => conn.execute(
      "INSERT INTO actor_profiles (
         profile_id, user_id, location, embedded_image, availability,
         bio, skills, created_at, updated_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
      params![
        profile_id,
        user_id,
        c.location,
        c.embedded_image,
        availability,
        p.bio,
        p.skills,
        created_at,
        updated_at,
      ],
    )?,
    RoleProfile::Filmmaker(p) => conn.execute(
      "INSERT INTO filmmaker_profiles (
         profile_id, user_id, location, embedded_image, availability,
         information, movies_done, created_at, updated_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
      params![
        profile_id,
        user_id,
        c.location,
        c.embedded_image,
        availability,
        p.information,
        p.movies_done,
        created_at,
        updated_at,
      ],
    )?,
  };
  Ok(())
}

fn save_profile(conn: &Connection, profile: &RoleProfile) -> Result<()> {
  let c = profile.common();
  let profile_id = encode_uuid(c.profile_id);
  let updated_at = encode_dt(c.updated_at);
  let availability = c.availability.as_str();

  match profile {
    RoleProfile::Actor(p) => conn.execute(
      "UPDATE actor_profiles
       SET location = ?2, embedded_image = ?3, availability = ?4,
           bio = ?5, skills = ?6, updated_at = ?7
       WHERE profile_id = ?1",
      params![
        profile_id,
        c.location,
        c.embedded_image,
        availability,
        p.bio,
        p.skills,
        updated_at,
      ],
    )?,
    RoleProfile::Filmmaker(p) => conn.execute(
      "UPDATE filmmaker_profiles
       SET location = ?2, embedded_image = ?3, availability = ?4,
           information = ?5, movies_done = ?6, updated_at = ?7
       WHERE profile_id = ?1",
      params![
        profile_id,
        c.location,
        c.embedded_image,
        availability,
        p.information,
        p.movies_done,
        updated_at,
      ],
    )?,
  };
  Ok(())
}

fn profile_exists(conn: &Connection, user_id: &UserId, role: Role) -> Result<bool> {
  let sql = format!("SELECT 1 FROM {} WHERE user_id = ?1", profile_table(role));
  Ok(
    conn
      .query_row(&sql, params![user_id.as_str()], |_| Ok(()))
      .optional()?
      .is_some(),
  )
}

// ─── Transactions ────────────────────────────────────────────────────────────

fn register_tx(
  conn: &mut Connection,
  reg: Registration,
  now: DateTime<Utc>,
) -> Result<Registered> {
  let tx = conn.transaction()?;

  let (user, created) = match load_user(&tx, &reg.user_id)? {
    None => {
      let user = reconcile::new_user(&reg, now);
      insert_user(&tx, &user)?;
      (user, true)
    }
    Some(mut user) => {
      if reconcile::merge_registration(&mut user, &reg) {
        update_user(&tx, &user)?;
      }
      (user, false)
    }
  };

  // Rows of the other variant are kept; reads only ever follow `user.role`.
  if !profile_exists(&tx, &user.user_id, user.role)? {
    let profile = RoleProfile::empty(user.role, user.user_id.clone(), now);
    insert_profile(&tx, &profile)?;
  }

  tx.commit()?;
  Ok(Registered { user, created })
}

fn update_tx(
  conn: &mut Connection,
  user_id: UserId,
  update: ProfileUpdate,
  now: DateTime<Utc>,
) -> Result<Option<User>> {
  let tx = conn.transaction()?;

  let Some(mut user) = load_user(&tx, &user_id)? else {
    return Ok(None);
  };

  let stored = load_profile(&tx, &user_id, user.role)?;
  let exists = stored.is_some();
  let mut profile = stored
    .unwrap_or_else(|| RoleProfile::empty(user.role, user_id.clone(), now));

  let applied = reconcile::apply_update(&mut user, &mut profile, update, now);

  if !exists {
    insert_profile(&tx, &profile)?;
  } else if applied.profile_changed {
    save_profile(&tx, &profile)?;
  }
  if applied.user_changed {
    update_user(&tx, &user)?;
  }

  tx.commit()?;
  Ok(Some(user))
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = crate::Error;

  #[tracing::instrument(skip_all, fields(user_id = %input.user_id, role = %input.role))]
  async fn register(&self, input: Registration) -> Result<Registered> {
    let now = Utc::now();
    let registered = self
      .conn
      .call(move |conn| Ok(register_tx(conn, input, now)?))
      .await?;

    if registered.created {
      tracing::info!("user created");
    } else {
      tracing::info!("user updated");
    }
    Ok(registered)
  }

  #[tracing::instrument(skip_all, fields(user_id = %user_id))]
  async fn update_profile(
    &self,
    user_id: UserId,
    update: ProfileUpdate,
  ) -> Result<Option<User>> {
    let now = Utc::now();
    let user = self
      .conn
      .call(move |conn| Ok(update_tx(conn, user_id, update, now)?))
      .await?;

    match &user {
      Some(u) => tracing::info!(complete = u.profile_complete, "profile updated"),
      None => tracing::debug!("no such user"),
    }
    Ok(user)
  }

  async fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
    Ok(
      self
        .conn
        .call(move |conn| Ok(load_user(conn, &user_id)?))
        .await?,
    )
  }

  async fn get_role_profile(
    &self,
    user_id: UserId,
    role: Role,
  ) -> Result<Option<RoleProfile>> {
    Ok(
      self
        .conn
        .call(move |conn| Ok(load_profile(conn, &user_id, role)?))
        .await?,
    )
  }
}
