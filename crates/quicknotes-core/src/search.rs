//! Read-side filtering of a snapshot.
//!
//! Filtering never touches the store; callers rerun it whenever a new
//! snapshot arrives.

use crate::note::Note;

/// Notes whose title or content contains `query`, ignoring case.
///
/// The query is trimmed first. A blank query matches every note. Order is
/// preserved.
pub fn filter<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
  let needle = query.trim().to_lowercase();
  if needle.is_empty() {
    return notes.iter().collect();
  }
  notes.iter().filter(|n| n.matches(&needle)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn notes() -> Vec<Note> {
    vec![
      Note::new(2, "Groceries", "Milk, eggs", 20),
      Note::new(1, "Todo", "Finish report", 10),
    ]
  }

  #[test]
  fn matches_title_case_insensitively() {
    let notes = notes();
    let hits = filter(&notes, "gro");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);

    assert_eq!(filter(&notes, "GRO").len(), 1);
  }

  #[test]
  fn matches_content() {
    let notes = notes();
    let hits = filter(&notes, "report");
    assert_eq!(hits.iter().map(|n| n.id).collect::<Vec<_>>(), [1]);
  }

  #[test]
  fn blank_query_returns_everything_in_order() {
    let notes = notes();
    let hits = filter(&notes, "   ");
    assert_eq!(hits.iter().map(|n| n.id).collect::<Vec<_>>(), [2, 1]);
  }

  #[test]
  fn query_is_trimmed() {
    let notes = notes();
    assert_eq!(filter(&notes, "  todo ").len(), 1);
  }

  #[test]
  fn no_match_is_empty() {
    assert!(filter(&notes(), "bread").is_empty());
  }
}
