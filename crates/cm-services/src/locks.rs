//! Keyed async locks for the daily cap
//!
//! The check-then-insert of a work entry must not interleave with another
//! submission for the same consultant and date. Each `(consultant, date)` key
//! gets its own `tokio::sync::Mutex`; unrelated keys never contend.

use std::sync::Arc;

use chrono::NaiveDate;
use cm_core::traits::Id;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type Key = (Id, NaiveDate);

#[derive(Clone, Default)]
pub struct DailyLocks {
    locks: Arc<DashMap<Key, Arc<Mutex<()>>>>,
}

impl DailyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to one consultant's date
    pub async fn acquire(&self, consultant_id: Id, work_date: NaiveDate) -> DailyGuard {
        let key = (consultant_id, work_date);
        let mutex = self.locks.entry(key).or_default().clone();
        let guard = mutex.lock_owned().await;
        DailyGuard {
            key,
            locks: self.locks.clone(),
            _guard: guard,
        }
    }

    /// Number of keys currently tracked
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Held for the duration of a critical section
pub struct DailyGuard {
    key: Key,
    locks: Arc<DashMap<Key, Arc<Mutex<()>>>>,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for DailyGuard {
    fn drop(&mut self) {
        // Two references left means the map and this guard; nobody is waiting.
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) <= 2);
    }
}
