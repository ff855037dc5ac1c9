//! SQL schema for the casting SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id          TEXT PRIMARY KEY,   -- issued by the identity provider
    display_name     TEXT NOT NULL,
    email            TEXT NOT NULL UNIQUE,
    role             TEXT NOT NULL CHECK (role IN ('actor', 'filmmaker')),
    profile_complete INTEGER NOT NULL DEFAULT 0,
    registered_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS actor_profiles (
    profile_id     TEXT PRIMARY KEY,
    user_id        TEXT NOT NULL UNIQUE
                   REFERENCES users(user_id) ON DELETE CASCADE,
    location       TEXT NOT NULL DEFAULT '',
    embedded_image TEXT,                -- data URL or media-relative path
    availability   TEXT NOT NULL DEFAULT 'no'
                   CHECK (availability IN ('yes', 'no')),
    bio            TEXT NOT NULL DEFAULT '',
    skills         TEXT NOT NULL DEFAULT '',
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS filmmaker_profiles (
    profile_id     TEXT PRIMARY KEY,
    user_id        TEXT NOT NULL UNIQUE
                   REFERENCES users(user_id) ON DELETE CASCADE,
    location       TEXT NOT NULL DEFAULT '',
    embedded_image TEXT,
    availability   TEXT NOT NULL DEFAULT 'no'
                   CHECK (availability IN ('yes', 'no')),
    information    TEXT NOT NULL DEFAULT '',
    movies_done    INTEGER NOT NULL DEFAULT 0 CHECK (movies_done >= 0),
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);

PRAGMA user_version = 1;
";
