//! [`NoteSession`] — the authoritative in-memory view of all notes.
//!
//! The session mirrors the store's change stream into its own watch channel.
//! Mutations go straight to the repository. While the session is running, a
//! mutation returns only after its snapshot is visible through
//! [`NoteSession::notes`].
//!
//! Lifecycle: build with [`NoteSession::new`], call [`start`] inside a tokio
//! runtime, and [`stop`] (or drop) when done.
//!
//! [`start`]: NoteSession::start
//! [`stop`]: NoteSession::stop

use std::{
  fmt,
  sync::{Arc, Mutex, PoisonError},
};

use quicknotes_core::{
  clock::{Clock, IdAllocator, SystemClock, TimestampIds},
  codec,
  note::{Note, NoteId, Snapshot},
  store::{NoteStore, NoteStream},
};
use tokio::{sync::watch, task::JoinHandle};

use crate::{
  Error, Result, repository::NoteRepository, transfer::TransferBroker,
};

// ─── View ────────────────────────────────────────────────────────────────────

/// What presentation observes: the current snapshot and how many snapshots
/// have been received since the session was built.
#[derive(Debug, Clone, Default)]
pub struct SessionView {
  pub notes:    Snapshot,
  /// Zero until the first snapshot arrives.
  pub revision: u64,
}

impl SessionView {
  pub fn is_loaded(&self) -> bool { self.revision > 0 }
}

/// Copy the store's latest snapshot into `view` unless it is already there.
///
/// The store's value is read while the view is locked, so concurrent callers
/// can never move the view back to an older snapshot.
fn catch_up(view: &watch::Sender<SessionView>, source: &NoteStream) -> bool {
  view.send_if_modified(|v| {
    let latest = source.latest();
    if v.is_loaded() && Arc::ptr_eq(&v.notes, &latest) {
      return false;
    }
    v.notes = latest;
    v.revision += 1;
    true
  })
}

// ─── Session ─────────────────────────────────────────────────────────────────

pub struct NoteSession<S: NoteStore> {
  repo:   NoteRepository<S>,
  source: NoteStream,
  clock:  Arc<dyn Clock>,
  ids:    Arc<dyn IdAllocator>,
  view:   Arc<watch::Sender<SessionView>>,
  task:   Mutex<Option<JoinHandle<()>>>,
}

impl<S: NoteStore> fmt::Debug for NoteSession<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let view = self.view.borrow();
    f.debug_struct("NoteSession")
      .field("notes", &view.notes.len())
      .field("revision", &view.revision)
      .field("running", &self.is_running())
      .finish()
  }
}

impl<S: NoteStore> NoteSession<S> {
  /// A stopped session using the system clock and timestamp ids.
  pub fn new(repo: NoteRepository<S>) -> Self {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ids: Arc<dyn IdAllocator> = Arc::new(TimestampIds::new(Arc::clone(&clock)));
    let (view, _) = watch::channel(SessionView::default());
    let source = repo.notes();

    Self {
      repo,
      source,
      clock,
      ids,
      view: Arc::new(view),
      task: Mutex::new(None),
    }
  }

  /// Use `clock` for `updated_at` stamps and for timestamp ids.
  pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.ids = Arc::new(TimestampIds::new(Arc::clone(&clock)));
    self.clock = clock;
    self
  }

  /// Use a custom id strategy for interactive creates.
  pub fn with_ids(mut self, ids: Arc<dyn IdAllocator>) -> Self {
    self.ids = ids;
    self
  }

  // ── Lifecycle ─────────────────────────────────────────────────────────────

  /// Subscribe to the store and start mirroring snapshots. Calling this on a
  /// running session does nothing.
  ///
  /// Must be called from within a tokio runtime.
  pub fn start(&self) {
    let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
    if task.as_ref().is_some_and(|t| !t.is_finished()) {
      return;
    }

    let mut stream = self.repo.notes();
    let view = Arc::clone(&self.view);

    *task = Some(tokio::spawn(async move {
      while stream.next().await.is_some() {
        if catch_up(&view, &stream) {
          tracing::debug!(notes = view.borrow().notes.len(), "snapshot received");
        }
      }
      tracing::warn!("note stream closed");
    }));
    tracing::debug!("note session started");
  }

  /// Stop mirroring. The last snapshot stays readable.
  pub fn stop(&self) {
    let task = self
      .task
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .take();
    if let Some(task) = task {
      task.abort();
      tracing::debug!("note session stopped");
    }
  }

  pub fn is_running(&self) -> bool {
    self
      .task
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .as_ref()
      .is_some_and(|t| !t.is_finished())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// The current snapshot. Empty until the first snapshot arrives.
  pub fn notes(&self) -> Snapshot { Arc::clone(&self.view.borrow().notes) }

  /// A receiver that is notified on every snapshot change.
  pub fn watch(&self) -> watch::Receiver<SessionView> { self.view.subscribe() }

  /// Wait for the first snapshot and return the current one.
  pub async fn loaded(&self) -> Result<Snapshot> {
    let mut rx = self.view.subscribe();
    if !rx.borrow().is_loaded() && !self.is_running() {
      return Err(Error::NotRunning);
    }
    // The sender lives in `self`, so this only fails if the view was dropped.
    let notes = match rx.wait_for(SessionView::is_loaded).await {
      Ok(view) => Arc::clone(&view.notes),
      Err(_) => return Err(Error::NotRunning),
    };
    Ok(notes)
  }

  /// Bring the view up to the store's latest snapshot. A stopped session keeps
  /// its last view.
  fn sync(&self) {
    if self.is_running() {
      catch_up(&self.view, &self.source);
    }
  }

  /// Point lookup against the store.
  pub async fn get(&self, id: NoteId) -> Result<Option<Note>> {
    self.repo.get(id).await.map_err(Error::store)
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Write a note and return its id.
  ///
  /// Without `id` a fresh one is allocated. `updated_at` is always stamped
  /// with the current time, so editing an imported note moves it to the
  /// front. The stamp comes from the clock, not the id: when several creates
  /// land in one millisecond the timestamp allocator bumps the id past the
  /// clock, and the note keeps the clock's value.
  pub async fn create_or_update(
    &self,
    title: impl Into<String>,
    content: impl Into<String>,
    id: Option<NoteId>,
  ) -> Result<NoteId> {
    let id = id.unwrap_or_else(|| self.ids.allocate());
    let note = Note::new(id, title, content, self.clock.now_millis());

    self.repo.upsert(note).await.map_err(Error::store)?;
    self.sync();
    tracing::debug!(id, "note written");
    Ok(id)
  }

  /// Rewrite an existing note, keeping any field passed as `None`.
  pub async fn edit(
    &self,
    id: NoteId,
    title: Option<String>,
    content: Option<String>,
  ) -> Result<()> {
    let current = self.get(id).await?.ok_or(Error::NotFound(id))?;
    self
      .create_or_update(
        title.unwrap_or(current.title),
        content.unwrap_or(current.content),
        Some(id),
      )
      .await?;
    Ok(())
  }

  /// Remove `note`. Returns whether it existed.
  pub async fn delete(&self, note: &Note) -> Result<bool> {
    let removed = self.repo.delete(note).await.map_err(Error::store)?;
    self.sync();
    tracing::debug!(id = note.id, removed, "note deleted");
    Ok(removed)
  }

  /// Remove every note. Returns how many were removed.
  pub async fn clear(&self) -> Result<usize> {
    let removed = self.repo.delete_all().await.map_err(Error::store)?;
    self.sync();
    tracing::info!(removed, "all notes deleted");
    Ok(removed)
  }

  // ── Backup ────────────────────────────────────────────────────────────────

  /// Encode the in-memory snapshot. Never reads the store.
  pub fn export_snapshot(&self) -> Result<String> {
    let notes = self.notes();
    Ok(codec::encode(&notes)?)
  }

  /// Decode `text` and upsert each note in order, replacing notes that share
  /// an id. Returns the number of notes written.
  ///
  /// Decoding finishes before the first write, so malformed text changes
  /// nothing. The writes are not one transaction: if one fails, the notes
  /// before it stay written.
  pub async fn import_from_text(&self, text: &str) -> Result<usize> {
    let notes = codec::decode(text)?;
    let total = notes.len();

    for (applied, note) in notes.into_iter().enumerate() {
      let id = note.id;
      if let Err(err) = self.repo.upsert(note).await {
        self.sync();
        tracing::warn!(id, applied, total, "import stopped partway");
        return Err(Error::store(err));
      }
    }
    self.sync();

    tracing::info!(count = total, "notes imported");
    Ok(total)
  }

  /// Export the in-memory snapshot to `dest`. Returns the number of notes.
  pub async fn export_to<B: TransferBroker>(
    &self,
    broker: &B,
    dest: &B::Handle,
  ) -> Result<usize> {
    let notes = self.notes();
    let text = codec::encode(&notes)?;
    broker.write_text(dest, &text).await?;

    tracing::info!(count = notes.len(), ?dest, "notes exported");
    Ok(notes.len())
  }

  /// Read a backup from `src` and import it.
  pub async fn import_from<B: TransferBroker>(
    &self,
    broker: &B,
    src: &B::Handle,
  ) -> Result<usize> {
    let text = broker.read_text(src).await?;
    self.import_from_text(&text).await
  }
}

impl<S: NoteStore> Drop for NoteSession<S> {
  fn drop(&mut self) { self.stop(); }
}
