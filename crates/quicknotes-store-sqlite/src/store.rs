//! [`SqliteStore`] — the SQLite implementation of [`NoteStore`].

use std::{path::Path, sync::Arc};

use quicknotes_core::{
  note::{Note, NoteId, Snapshot},
  store::{NoteStore, NoteStream},
};
use rusqlite::OptionalExtension as _;
use tokio::sync::watch;

use crate::{
  Error, Result,
  encode::{DELETE_ALL, DELETE_ONE, SELECT_ONE, UPSERT, decode_note, load_snapshot},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A note store backed by a single SQLite file.
///
/// Cloning is cheap — clones share the connection and the snapshot channel.
#[derive(Clone)]
pub struct SqliteStore {
  conn:      tokio_rusqlite::Connection,
  snapshots: Arc<watch::Sender<Snapshot>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let location = path.as_ref().display().to_string();
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(|source| Error::Unavailable { location: location.clone(), source })?;
    Self::init(conn, location).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let location = String::from(":memory:");
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(|source| Error::Unavailable { location: location.clone(), source })?;
    Self::init(conn, location).await
  }

  async fn init(conn: tokio_rusqlite::Connection, location: String) -> Result<Self> {
    let initial = conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(load_snapshot(conn)?)
      })
      .await
      .map_err(|source| Error::Unavailable { location: location.clone(), source })?;

    tracing::info!(%location, notes = initial.len(), "note store opened");

    let (snapshots, _) = watch::channel(initial);
    Ok(Self { conn, snapshots: Arc::new(snapshots) })
  }

  /// Run `op` and re-read the table inside one transaction on the connection
  /// thread, then publish the result.
  ///
  /// Publishing from the connection thread keeps snapshots in the same order
  /// as the mutations that produced them.
  async fn mutate<F>(&self, op: &'static str, f: F) -> Result<usize>
  where
    F: FnOnce(&rusqlite::Connection) -> rusqlite::Result<usize> + Send + 'static,
  {
    let snapshots = Arc::clone(&self.snapshots);

    let (changed, total) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = f(&tx)?;
        let snapshot = load_snapshot(&tx)?;
        tx.commit()?;

        let total = snapshot.len();
        snapshots.send_replace(snapshot);
        Ok((changed, total))
      })
      .await?;

    tracing::debug!(op, changed, notes = total, "notes table mutated");
    Ok(changed)
  }
}

// ─── NoteStore impl ──────────────────────────────────────────────────────────

impl NoteStore for SqliteStore {
  type Error = Error;

  fn subscribe(&self) -> NoteStream { NoteStream::new(self.snapshots.subscribe()) }

  async fn list(&self) -> Result<Snapshot> {
    let snapshot = self.conn.call(|conn| Ok(load_snapshot(conn)?)).await?;
    Ok(snapshot)
  }

  async fn get(&self, id: NoteId) -> Result<Option<Note>> {
    let note = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(SELECT_ONE, rusqlite::params![id], decode_note)
            .optional()?,
        )
      })
      .await?;
    Ok(note)
  }

  async fn upsert(&self, note: Note) -> Result<()> {
    self
      .mutate("upsert", move |conn| {
        conn.execute(
          UPSERT,
          rusqlite::params![note.id, note.title, note.content, note.updated_at],
        )
      })
      .await?;
    Ok(())
  }

  async fn delete(&self, note: &Note) -> Result<bool> {
    let id = note.id;
    let removed = self
      .mutate("delete", move |conn| {
        conn.execute(DELETE_ONE, rusqlite::params![id])
      })
      .await?;
    Ok(removed > 0)
  }

  async fn delete_all(&self) -> Result<usize> {
    self.mutate("delete_all", |conn| conn.execute(DELETE_ALL, [])).await
  }
}
