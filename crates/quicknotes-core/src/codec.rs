//! JSON backup format.
//!
//! A backup is a JSON array of objects with the keys `id`, `title`, `content`
//! and `updatedAt`. `id` and `updatedAt` are required integers; a missing
//! `title` or `content` decodes as an empty string. Unknown keys are ignored.

use crate::{Error, Result, note::Note};

/// Encode `notes` as a compact JSON array. An empty slice encodes as `[]`.
pub fn encode(notes: &[Note]) -> Result<String> {
  serde_json::to_string(notes).map_err(Error::Encode)
}

/// Decode a JSON array of notes.
///
/// The whole document is parsed before anything is returned, so a caller
/// never sees a partial list.
pub fn decode(text: &str) -> Result<Vec<Note>> {
  serde_json::from_str(text).map_err(Error::MalformedInput)
}
