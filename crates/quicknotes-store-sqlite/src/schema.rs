//! SQL schema for the QuickNotes SQLite store.
//!
//! Executed once at connection startup. The layout is fixed at
//! `PRAGMA user_version = 1`; there are no migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per note. Writes replace the whole row (INSERT OR REPLACE).
CREATE TABLE IF NOT EXISTS notes (
    id         INTEGER PRIMARY KEY,   -- ms timestamp for interactive creates
    title      TEXT    NOT NULL,
    content    TEXT    NOT NULL,
    updatedAt  INTEGER NOT NULL       -- ms since epoch; presentation sort key
);

CREATE INDEX IF NOT EXISTS notes_updated_idx ON notes(updatedAt);

PRAGMA user_version = 1;
";
