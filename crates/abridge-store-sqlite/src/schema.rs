//! SQL schema for the abridge SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids of deleted rows from being handed out again.
CREATE TABLE IF NOT EXISTS summaries (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    original_text     TEXT NOT NULL,
    summary_text      TEXT NOT NULL,
    created_at        TEXT NOT NULL,   -- RFC 3339 UTC, fixed width; server-assigned
    updated_at        TEXT NOT NULL,   -- RFC 3339 UTC, fixed width; refreshed on every write
    title             TEXT,
    compression_ratio REAL NOT NULL,
    CHECK (updated_at >= created_at)
);

CREATE INDEX IF NOT EXISTS summaries_created_idx ON summaries(created_at);

PRAGMA user_version = 1;
";
