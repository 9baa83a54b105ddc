//! Note — the only entity in the store.
//!
//! A note is a flat record keyed by a 64-bit id. Writes replace the whole
//! record; there is no merge and no tombstone.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Primary key of a note. Interactive creates use a millisecond timestamp.
pub type NoteId = i64;

/// An immutable view of every note, most recently updated first.
pub type Snapshot = Arc<[Note]>;

/// Placeholder shown for notes whose title is blank.
pub const UNTITLED: &str = "(No title)";

/// A single note. Serialises to the export format
/// `{"id", "title", "content", "updatedAt"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
  pub id:         NoteId,
  #[serde(default)]
  pub title:      String,
  #[serde(default)]
  pub content:    String,
  /// Milliseconds since the Unix epoch of the most recent write.
  pub updated_at: i64,
}

impl Note {
  pub fn new(
    id: NoteId,
    title: impl Into<String>,
    content: impl Into<String>,
    updated_at: i64,
  ) -> Self {
    Self { id, title: title.into(), content: content.into(), updated_at }
  }

  /// The title, or [`UNTITLED`] when it is blank.
  pub fn display_title(&self) -> &str {
    if self.title.trim().is_empty() { UNTITLED } else { self.title.as_str() }
  }

  /// Substring match against title or content, ignoring case.
  ///
  /// `needle` must already be lowercase.
  pub fn matches(&self, needle: &str) -> bool {
    self.title.to_lowercase().contains(needle)
      || self.content.to_lowercase().contains(needle)
  }
}
