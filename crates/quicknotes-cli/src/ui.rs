//! Plain-text rendering of notes.

use chrono::{DateTime, Local};
use quicknotes_core::note::Note;

const PREVIEW_CHARS: usize = 48;

/// `YYYY-MM-DD HH:MM` in local time; the raw number if out of range.
pub fn format_timestamp(millis: i64) -> String {
  match DateTime::from_timestamp_millis(millis) {
    Some(utc) => utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    None => millis.to_string(),
  }
}

/// Shorten `text` to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
  if text.chars().count() <= max {
    return text.to_owned();
  }
  let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
  out.push('…');
  out
}

/// One line per note for `list`.
pub fn summary_line(note: &Note) -> String {
  let first_line = note.content.lines().next().unwrap_or_default();
  format!(
    "{:>13}  {}  {}  {}",
    note.id,
    format_timestamp(note.updated_at),
    truncate(note.display_title(), PREVIEW_CHARS),
    truncate(first_line, PREVIEW_CHARS),
  )
  .trim_end()
  .to_owned()
}

/// Full rendering for `show`.
pub fn detail(note: &Note) -> String {
  format!(
    "{}\nid:      {}\nupdated: {}\n\n{}",
    note.display_title(),
    note.id,
    format_timestamp(note.updated_at),
    note.content,
  )
}

/// What `list` prints when nothing is shown.
pub fn empty_message(searching: bool) -> &'static str {
  if searching { "No notes found" } else { "No notes yet! Add one with `quicknotes add`." }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn truncate_keeps_short_text() {
    assert_eq!(truncate("short", 10), "short");
  }

  #[test]
  fn truncate_marks_the_cut() {
    assert_eq!(truncate("abcdefghij", 5), "abcd…");
  }

  #[test]
  fn truncate_counts_characters_not_bytes() {
    assert_eq!(truncate("ééééé", 5), "ééééé");
  }

  #[test]
  fn timestamp_has_minute_precision() {
    let text = format_timestamp(1_700_000_000_000);
    assert_eq!(text.len(), "2023-11-14 22:13".len());
  }

  #[test]
  fn out_of_range_timestamp_falls_back_to_number() {
    assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
  }

  #[test]
  fn summary_uses_placeholder_and_first_line() {
    let note = Note::new(7, "", "first line\nsecond line", 1_700_000_000_000);
    let line = summary_line(&note);
    assert!(line.contains("(No title)"));
    assert!(line.contains("first line"));
    assert!(!line.contains("second line"));
  }

  #[test]
  fn detail_shows_full_content() {
    let note = Note::new(7, "Todo", "one\ntwo", 0);
    let text = detail(&note);
    assert!(text.starts_with("Todo\n"));
    assert!(text.ends_with("one\ntwo"));
  }
}
