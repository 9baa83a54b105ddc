//! Integration tests for `SqliteStore` against in-memory and file databases.

use quicknotes_core::{note::Note, store::NoteStore};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ids(notes: &[Note]) -> Vec<i64> { notes.iter().map(|n| n.id).collect() }

// ─── Point reads and writes ──────────────────────────────────────────────────

#[tokio::test]
async fn upsert_and_get() {
  let s = store().await;
  let note = Note::new(1_700_000_000_000, "Groceries", "Milk, eggs", 1_700_000_000_000);

  s.upsert(note.clone()).await.unwrap();

  let fetched = s.get(note.id).await.unwrap();
  assert_eq!(fetched, Some(note));
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_same_id_replaces_without_merge() {
  let s = store().await;
  s.upsert(Note::new(1, "first title", "first body", 10)).await.unwrap();
  s.upsert(Note::new(1, "", "second body", 20)).await.unwrap();

  let all = s.list().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0], Note::new(1, "", "second body", 20));
}

#[tokio::test]
async fn empty_strings_round_trip() {
  let s = store().await;
  s.upsert(Note::new(5, "", "", 0)).await.unwrap();
  assert_eq!(s.get(5).await.unwrap(), Some(Note::new(5, "", "", 0)));
}

// ─── Ordering ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_is_newest_first() {
  let s = store().await;
  s.upsert(Note::new(1, "old", "", 100)).await.unwrap();
  s.upsert(Note::new(2, "new", "", 300)).await.unwrap();
  s.upsert(Note::new(3, "mid", "", 200)).await.unwrap();

  assert_eq!(ids(&s.list().await.unwrap()), [2, 3, 1]);
}

#[tokio::test]
async fn ties_are_ordered_by_id_descending() {
  let s = store().await;
  s.upsert(Note::new(1, "a", "", 100)).await.unwrap();
  s.upsert(Note::new(3, "c", "", 100)).await.unwrap();
  s.upsert(Note::new(2, "b", "", 100)).await.unwrap();

  assert_eq!(ids(&s.list().await.unwrap()), [3, 2, 1]);
}

#[tokio::test]
async fn rewriting_a_note_moves_it_to_the_front() {
  let s = store().await;
  s.upsert(Note::new(1, "a", "", 100)).await.unwrap();
  s.upsert(Note::new(2, "b", "", 200)).await.unwrap();
  s.upsert(Note::new(1, "a edited", "", 300)).await.unwrap();

  assert_eq!(ids(&s.list().await.unwrap()), [1, 2]);
}

// ─── Deletion ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_only_the_target() {
  let s = store().await;
  let keep = Note::new(1, "keep", "", 1);
  let gone = Note::new(2, "gone", "", 2);
  s.upsert(keep.clone()).await.unwrap();
  s.upsert(gone.clone()).await.unwrap();

  assert!(s.delete(&gone).await.unwrap());
  assert_eq!(s.list().await.unwrap().to_vec(), vec![keep]);
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete(&Note::new(9, "", "", 0)).await.unwrap());
}

#[tokio::test]
async fn delete_all_is_idempotent() {
  let s = store().await;
  s.upsert(Note::new(1, "a", "", 1)).await.unwrap();
  s.upsert(Note::new(2, "b", "", 2)).await.unwrap();

  assert_eq!(s.delete_all().await.unwrap(), 2);
  assert_eq!(s.delete_all().await.unwrap(), 0);
  assert!(s.list().await.unwrap().is_empty());
}

// ─── Change stream ───────────────────────────────────────────────────────────

#[tokio::test]
async fn subscribe_yields_current_state_immediately() {
  let s = store().await;
  s.upsert(Note::new(1, "a", "", 1)).await.unwrap();

  let mut stream = s.subscribe();
  let first = stream.next().await.unwrap();
  assert_eq!(ids(&first), [1]);
}

#[tokio::test]
async fn stream_follows_mutations() {
  let s = store().await;
  let mut stream = s.subscribe();
  assert!(stream.next().await.unwrap().is_empty());

  let a = Note::new(1, "a", "", 10);
  s.upsert(a.clone()).await.unwrap();
  assert_eq!(ids(&stream.next().await.unwrap()), [1]);

  // Two mutations before the next read are conflated into the final state.
  s.upsert(Note::new(2, "b", "", 20)).await.unwrap();
  s.delete(&a).await.unwrap();
  assert_eq!(ids(&stream.next().await.unwrap()), [2]);
}

#[tokio::test]
async fn delete_all_publishes_empty_snapshot_even_when_empty() {
  let s = store().await;
  s.upsert(Note::new(1, "a", "", 1)).await.unwrap();

  let mut stream = s.subscribe();
  assert_eq!(stream.next().await.unwrap().len(), 1);

  s.delete_all().await.unwrap();
  assert!(stream.next().await.unwrap().is_empty());

  s.delete_all().await.unwrap();
  assert!(stream.next().await.unwrap().is_empty());
}

#[tokio::test]
async fn clones_share_the_change_stream() {
  let s = store().await;
  let other = s.clone();
  let mut stream = s.subscribe();
  stream.next().await.unwrap();

  other.upsert(Note::new(7, "from clone", "", 1)).await.unwrap();
  assert_eq!(ids(&stream.next().await.unwrap()), [7]);
}

#[tokio::test]
async fn snapshot_is_sorted_after_every_mutation() {
  let s = store().await;
  let mut stream = s.subscribe();
  stream.next().await.unwrap();

  for (id, ts) in [(1, 50), (2, 10), (3, 90), (4, 30)] {
    s.upsert(Note::new(id, "", "", ts)).await.unwrap();
    let snapshot = stream.next().await.unwrap();
    assert!(
      snapshot.windows(2).all(|w| w[0].updated_at >= w[1].updated_at),
      "unsorted snapshot: {snapshot:?}"
    );
  }
}

// ─── Files ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn file_store_persists_across_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("notes.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.upsert(Note::new(1, "kept", "on disk", 5)).await.unwrap();
  }

  let reopened = SqliteStore::open(&path).await.unwrap();
  let mut stream = reopened.subscribe();
  let first = stream.next().await.unwrap();
  assert_eq!(first.to_vec(), vec![Note::new(1, "kept", "on disk", 5)]);
}

#[tokio::test]
async fn open_in_missing_directory_is_unavailable() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("does-not-exist").join("notes.db");

  let err = SqliteStore::open(&path).await.err().expect("open should fail");
  assert!(matches!(err, Error::Unavailable { .. }), "unexpected error: {err}");
}
