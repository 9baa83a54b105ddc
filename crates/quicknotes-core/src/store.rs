//! The `NoteStore` trait and the change stream it publishes.
//!
//! The trait is implemented by storage backends (e.g.
//! `quicknotes-store-sqlite`). The session controller depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use tokio::sync::watch;

use crate::note::{Note, NoteId, Snapshot};

// ─── Change stream ───────────────────────────────────────────────────────────

/// A live sequence of full-table snapshots, newest `updated_at` first.
///
/// The first call to [`next`](Self::next) yields the state at subscription
/// time without waiting. Every later call waits for the next mutation. When
/// several mutations land between two calls only the latest snapshot is
/// yielded.
#[derive(Debug)]
pub struct NoteStream {
  rx:     watch::Receiver<Snapshot>,
  primed: bool,
}

impl NoteStream {
  /// Wrap the receiving half of a backend's snapshot channel.
  pub fn new(rx: watch::Receiver<Snapshot>) -> Self { Self { rx, primed: false } }

  /// The next snapshot, or `None` once the publishing store is gone.
  pub async fn next(&mut self) -> Option<Snapshot> {
    if self.primed {
      self.rx.changed().await.ok()?;
    }
    self.primed = true;
    let snapshot = self.rx.borrow_and_update().clone();
    Some(snapshot)
  }

  /// The most recently published snapshot, without marking it seen.
  pub fn latest(&self) -> Snapshot { self.rx.borrow().clone() }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a note storage backend.
///
/// Every successful mutation publishes a fresh snapshot to all streams
/// obtained from [`subscribe`](Self::subscribe). Mutations are serialised by
/// the backend; a reader never observes a partially written note.
pub trait NoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Subscribe to the change stream.
  fn subscribe(&self) -> NoteStream;

  /// Read every note now, newest `updated_at` first.
  fn list(&self) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;

  /// Retrieve a note by id. Returns `None` if not found.
  fn get(
    &self,
    id: NoteId,
  ) -> impl Future<Output = Result<Option<Note>, Self::Error>> + Send + '_;

  /// Insert `note`, replacing any existing note with the same id.
  fn upsert(&self, note: Note) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove the note with `note.id`. Returns whether a note was removed.
  fn delete<'a>(
    &'a self,
    note: &'a Note,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Remove every note and return how many were removed. Publishes an empty
  /// snapshot even when the table was already empty.
  fn delete_all(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
