//! [`NoteRepository`] — the seam between the session and a storage backend.
//!
//! Every method delegates straight to the store. Swapping the storage engine
//! only touches the binary that builds the repository.

use std::sync::Arc;

use quicknotes_core::{
  note::{Note, NoteId, Snapshot},
  store::{NoteStore, NoteStream},
};

pub struct NoteRepository<S> {
  store: Arc<S>,
}

impl<S> Clone for NoteRepository<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: NoteStore> NoteRepository<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Live snapshots of every note; see [`NoteStream`].
  pub fn notes(&self) -> NoteStream { self.store.subscribe() }

  pub async fn list(&self) -> Result<Snapshot, S::Error> { self.store.list().await }

  pub async fn get(&self, id: NoteId) -> Result<Option<Note>, S::Error> {
    self.store.get(id).await
  }

  pub async fn upsert(&self, note: Note) -> Result<(), S::Error> {
    self.store.upsert(note).await
  }

  pub async fn delete(&self, note: &Note) -> Result<bool, S::Error> {
    self.store.delete(note).await
  }

  pub async fn delete_all(&self) -> Result<usize, S::Error> {
    self.store.delete_all().await
  }
}
