//! SQL schema for the Rolo SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    contact_id     TEXT PRIMARY KEY,   -- hyphenated UUID; never reused
    first_name     TEXT NOT NULL CHECK (length(trim(first_name)) > 0),
    last_name      TEXT NOT NULL CHECK (length(trim(last_name)) > 0),
    email          TEXT NOT NULL CHECK (length(trim(email)) > 0),
    phone          TEXT,
    favorite_color TEXT,
    birthday       TEXT,               -- YYYY-MM-DD
    tags           TEXT NOT NULL DEFAULT '[]',
    created_at     TEXT NOT NULL,      -- fixed-width RFC 3339 UTC
    last_modified  TEXT NOT NULL,
    CHECK (last_modified >= created_at)
);

PRAGMA user_version = 1;
";
