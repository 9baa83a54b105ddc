//! Time source and id allocation for interactive creates.
//!
//! Both are injected into the session so tests can drive them
//! deterministically.

use std::sync::{
  Arc,
  atomic::{AtomicI64, Ordering},
};

use chrono::Utc;

use crate::note::NoteId;

/// A source of wall-clock milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
  fn now_millis(&self) -> i64;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
  fn now_millis(&self) -> i64 { (**self).now_millis() }
}

/// The real UTC clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now_millis(&self) -> i64 { Utc::now().timestamp_millis() }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
  now: AtomicI64,
}

impl ManualClock {
  pub fn new(start_millis: i64) -> Self { Self { now: AtomicI64::new(start_millis) } }

  pub fn set(&self, millis: i64) { self.now.store(millis, Ordering::SeqCst); }

  pub fn advance(&self, millis: i64) { self.now.fetch_add(millis, Ordering::SeqCst); }
}

impl Clock for ManualClock {
  fn now_millis(&self) -> i64 { self.now.load(Ordering::SeqCst) }
}

// ─── Ids ─────────────────────────────────────────────────────────────────────

/// Strategy for choosing the id of a newly created note.
pub trait IdAllocator: Send + Sync {
  fn allocate(&self) -> NoteId;
}

/// Allocates the current millisecond timestamp, bumped past the previous
/// allocation so two creates in the same millisecond never share an id.
#[derive(Debug)]
pub struct TimestampIds<C> {
  clock: C,
  last:  AtomicI64,
}

impl<C: Clock> TimestampIds<C> {
  pub fn new(clock: C) -> Self { Self { clock, last: AtomicI64::new(i64::MIN) } }
}

impl<C: Clock> IdAllocator for TimestampIds<C> {
  fn allocate(&self) -> NoteId {
    let now = self.clock.now_millis();
    let next = |last: i64| now.max(last.saturating_add(1));
    let prev = self
      .last
      .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| Some(next(last)))
      .unwrap_or_else(|last| last);
    next(prev)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_follow_the_clock() {
    let clock = Arc::new(ManualClock::new(1_000));
    let ids = TimestampIds::new(Arc::clone(&clock));
    assert_eq!(ids.allocate(), 1_000);

    clock.advance(500);
    assert_eq!(ids.allocate(), 1_500);
  }

  #[test]
  fn same_millisecond_yields_distinct_ids() {
    let ids = TimestampIds::new(ManualClock::new(42));
    let allocated: Vec<_> = (0..3).map(|_| ids.allocate()).collect();
    assert_eq!(allocated, [42, 43, 44]);
  }

  #[test]
  fn clock_going_backwards_never_reuses_an_id() {
    let clock = Arc::new(ManualClock::new(100));
    let ids = TimestampIds::new(Arc::clone(&clock));
    assert_eq!(ids.allocate(), 100);

    clock.set(50);
    assert_eq!(ids.allocate(), 101);
  }

  #[test]
  fn system_clock_is_after_2020() {
    assert!(SystemClock.now_millis() > 1_577_836_800_000);
  }
}
