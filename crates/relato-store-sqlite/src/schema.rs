//! SQL schema for the Relato SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS stories (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    location    TEXT NOT NULL DEFAULT '',
    story_type  TEXT NOT NULL,
    story       TEXT NOT NULL,
    share       TEXT NOT NULL,   -- 'yes' | 'no'
    ip_address  TEXT NOT NULL,
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS stories_share_idx   ON stories(share);
CREATE INDEX IF NOT EXISTS stories_created_idx ON stories(created_at);

PRAGMA user_version = 1;
";
