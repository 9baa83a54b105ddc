//! Statements and row decoding for the `notes` table.

use quicknotes_core::note::{Note, Snapshot};
use rusqlite::{Connection, Row};

pub const SELECT_ALL: &str = "SELECT id, title, content, updatedAt FROM notes
   ORDER BY updatedAt DESC, id DESC";

pub const SELECT_ONE: &str =
  "SELECT id, title, content, updatedAt FROM notes WHERE id = ?1";

pub const UPSERT: &str = "INSERT OR REPLACE INTO notes (id, title, content, updatedAt)
   VALUES (?1, ?2, ?3, ?4)";

pub const DELETE_ONE: &str = "DELETE FROM notes WHERE id = ?1";

pub const DELETE_ALL: &str = "DELETE FROM notes";

/// Decode one row selected with the column order of [`SELECT_ALL`].
pub fn decode_note(row: &Row<'_>) -> rusqlite::Result<Note> {
  Ok(Note {
    id:         row.get(0)?,
    title:      row.get(1)?,
    content:    row.get(2)?,
    updated_at: row.get(3)?,
  })
}

/// Read the whole table, newest first.
pub fn load_snapshot(conn: &Connection) -> rusqlite::Result<Snapshot> {
  let mut stmt = conn.prepare_cached(SELECT_ALL)?;
  let notes = stmt
    .query_map([], decode_note)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(notes.into())
}
