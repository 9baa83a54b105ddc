//! Note commands, run against a started [`NoteSession`].

use std::{
  io::Write,
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::{Context, Result, anyhow, bail};
use quicknotes_core::{
  clock::{Clock, SystemClock},
  note::NoteId,
  search,
};
use quicknotes_session::{FsBroker, NoteRepository, NoteSession};
use quicknotes_store_sqlite::SqliteStore;

use crate::ui;

/// Top-level application state for one command invocation.
pub struct App {
  session: NoteSession<SqliteStore>,
  broker:  FsBroker,
}

impl App {
  /// Open the store at `store_path`, start the session and wait for the
  /// first snapshot.
  pub async fn open(store_path: &Path) -> Result<Self> {
    if let Some(parent) = store_path.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("creating data directory {}", parent.display()))?;
    }

    let store = SqliteStore::open(store_path)
      .await
      .with_context(|| format!("failed to open store at {}", store_path.display()))?;

    let session = NoteSession::new(NoteRepository::new(Arc::new(store)));
    session.start();
    session.loaded().await.context("loading notes")?;

    Ok(Self { session, broker: FsBroker })
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn list(&self, query: Option<&str>, out: &mut impl Write) -> Result<()> {
    let notes = self.session.notes();
    let query = query.unwrap_or_default();
    let shown = search::filter(&notes, query);

    if shown.is_empty() {
      writeln!(out, "{}", ui::empty_message(!query.trim().is_empty()))?;
      return Ok(());
    }
    for note in shown {
      writeln!(out, "{}", ui::summary_line(note))?;
    }
    Ok(())
  }

  pub async fn show(&self, id: NoteId, out: &mut impl Write) -> Result<()> {
    let note = self
      .session
      .get(id)
      .await?
      .ok_or_else(|| anyhow!("no note with id {id}"))?;
    writeln!(out, "{}", ui::detail(&note))?;
    Ok(())
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  pub async fn add(&self, title: &str, content: &str, out: &mut impl Write) -> Result<()> {
    let id = self.session.create_or_update(title, content, None).await?;
    writeln!(out, "{id}")?;
    Ok(())
  }

  pub async fn edit(
    &self,
    id: NoteId,
    title: Option<String>,
    content: Option<String>,
  ) -> Result<()> {
    if title.is_none() && content.is_none() {
      bail!("nothing to change; pass --title and/or --content");
    }
    self.session.edit(id, title, content).await?;
    Ok(())
  }

  pub async fn delete(&self, id: NoteId) -> Result<()> {
    let note = self
      .session
      .get(id)
      .await?
      .ok_or_else(|| anyhow!("no note with id {id}"))?;
    self.session.delete(&note).await?;
    Ok(())
  }

  pub async fn clear(&self, confirmed: bool, out: &mut impl Write) -> Result<()> {
    if !confirmed {
      bail!("refusing to delete every note without --yes");
    }
    let removed = self.session.clear().await?;
    writeln!(out, "Deleted {removed} notes")?;
    Ok(())
  }

  // ── Backup ────────────────────────────────────────────────────────────────

  pub async fn export(&self, file: Option<PathBuf>, out: &mut impl Write) -> Result<()> {
    let file = file.unwrap_or_else(default_export_name);
    let count = self
      .session
      .export_to(&self.broker, file.as_path())
      .await
      .context("saving notes")?;
    writeln!(out, "Saved {count} notes to {}", file.display())?;
    Ok(())
  }

  pub async fn import(&self, file: &Path, out: &mut impl Write) -> Result<()> {
    let count = self
      .session
      .import_from(&self.broker, file)
      .await
      .context("restoring notes")?;
    writeln!(out, "Restored {count} notes from {}", file.display())?;
    Ok(())
  }
}

/// `quicknotes-<millis>.json` in the working directory.
fn default_export_name() -> PathBuf {
  PathBuf::from(format!("quicknotes-{}.json", SystemClock.now_millis()))
}
