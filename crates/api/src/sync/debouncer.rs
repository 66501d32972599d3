//! Trailing debounce for per-day progress writes.
//!
//! Each `(user, day)` key has at most one scheduled write. Scheduling again
//! aborts the pending timer and starts a new one, so only the latest value
//! reaches the store. A timer that fires removes its own entry before
//! writing, which means a later reschedule never aborts an in-flight write.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stillwater_core::date_key::DateKey;
use stillwater_core::error::CoreError;
use stillwater_core::progress::DayProgress;
use stillwater_core::types::DbId;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Default quiet period before a progress write.
pub const DEFAULT_SYNC_DELAY: Duration = Duration::from_secs(1);

/// Backing store for day progress records.
#[async_trait]
pub trait ProgressStore: Send + Sync + 'static {
    /// Load one day's record, `None` if nothing was stored yet.
    async fn load_day(&self, user_id: DbId, date: DateKey)
        -> Result<Option<DayProgress>, CoreError>;

    /// Overwrite one day's record.
    async fn save_day(
        &self,
        user_id: DbId,
        date: DateKey,
        progress: DayProgress,
    ) -> Result<(), CoreError>;
}

type SyncKey = (DbId, DateKey);

struct Pending {
    generation: u64,
    progress: DayProgress,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct PendingWrites {
    next_generation: u64,
    entries: HashMap<SyncKey, Pending>,
}

/// Coalesces rapid progress updates into one delayed write per key.
pub struct ProgressDebouncer {
    store: Arc<dyn ProgressStore>,
    delay: Duration,
    pending: Arc<Mutex<PendingWrites>>,
}

impl ProgressDebouncer {
    pub fn new(store: Arc<dyn ProgressStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: Arc::new(Mutex::new(PendingWrites::default())),
        }
    }

    /// Schedule `progress` to be written for `(user_id, date)` after the quiet
    /// period, replacing any write still waiting for the same key.
    pub async fn schedule(&self, user_id: DbId, date: DateKey, progress: DayProgress) {
        let key = (user_id, date);
        let mut pending = self.pending.lock().await;

        pending.next_generation += 1;
        let generation = pending.next_generation;

        if let Some(previous) = pending.entries.remove(&key) {
            previous.handle.abort();
            tracing::trace!(user_id, %date, "Superseded pending progress write");
        }

        let handle = tokio::spawn(fire(
            Arc::clone(&self.pending),
            Arc::clone(&self.store),
            self.delay,
            key,
            generation,
            progress,
        ));

        pending.entries.insert(
            key,
            Pending {
                generation,
                progress,
                handle,
            },
        );
    }

    /// The value waiting to be written for `(user_id, date)`, if any.
    pub async fn pending_value(&self, user_id: DbId, date: DateKey) -> Option<DayProgress> {
        self.pending
            .lock()
            .await
            .entries
            .get(&(user_id, date))
            .map(|entry| entry.progress)
    }

    /// Number of keys with a write still waiting for its timer.
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.entries.len()
    }

    /// Cancel every timer and write all pending values now.
    ///
    /// Called on shutdown. Returns how many records were written or attempted.
    pub async fn flush_all(&self) -> usize {
        let drained: Vec<(SyncKey, Pending)> = {
            let mut pending = self.pending.lock().await;
            pending.entries.drain().collect()
        };

        for (_, entry) in &drained {
            entry.handle.abort();
        }

        for ((user_id, date), entry) in &drained {
            write(self.store.as_ref(), *user_id, *date, entry.progress).await;
        }

        if !drained.is_empty() {
            tracing::info!(count = drained.len(), "Flushed pending progress writes");
        }
        drained.len()
    }
}

/// Timer body for one scheduled write.
async fn fire(
    pending: Arc<Mutex<PendingWrites>>,
    store: Arc<dyn ProgressStore>,
    delay: Duration,
    key: SyncKey,
    generation: u64,
    progress: DayProgress,
) {
    tokio::time::sleep(delay).await;

    {
        let mut pending = pending.lock().await;
        match pending.entries.get(&key) {
            Some(entry) if entry.generation == generation => {
                pending.entries.remove(&key);
            }
            // Superseded or flushed while we waited for the lock.
            _ => return,
        }
    }

    let (user_id, date) = key;
    write(store.as_ref(), user_id, date, progress).await;
}

/// Persist one record. Failures are logged and swallowed; the in-memory
/// snapshot stays authoritative until the next successful write.
async fn write(store: &dyn ProgressStore, user_id: DbId, date: DateKey, progress: DayProgress) {
    match store.save_day(user_id, date, progress).await {
        Ok(()) => {
            tracing::debug!(
                user_id,
                %date,
                minutes = progress.minutes,
                habits = progress.habits,
                "Progress synced",
            );
        }
        Err(e) => {
            tracing::error!(user_id, %date, error = %e, "Progress sync failed");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory store recording every write, optionally failing all of them.
    #[derive(Default)]
    pub(crate) struct RecordingStore {
        pub writes: std::sync::Mutex<Vec<(DbId, DateKey, DayProgress)>>,
        pub stored: std::sync::Mutex<HashMap<SyncKey, DayProgress>>,
        pub fail_writes: bool,
        pub fail_reads: bool,
    }

    impl RecordingStore {
        pub fn writes(&self) -> Vec<(DbId, DateKey, DayProgress)> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProgressStore for RecordingStore {
        async fn load_day(
            &self,
            user_id: DbId,
            date: DateKey,
        ) -> Result<Option<DayProgress>, CoreError> {
            if self.fail_reads {
                return Err(CoreError::Internal("store offline".into()));
            }
            Ok(self.stored.lock().unwrap().get(&(user_id, date)).copied())
        }

        async fn save_day(
            &self,
            user_id: DbId,
            date: DateKey,
            progress: DayProgress,
        ) -> Result<(), CoreError> {
            self.writes.lock().unwrap().push((user_id, date, progress));
            if self.fail_writes {
                return Err(CoreError::Persistence("store offline".into()));
            }
            self.stored.lock().unwrap().insert((user_id, date), progress);
            Ok(())
        }
    }

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn habits(n: u32) -> DayProgress {
        DayProgress {
            minutes: 0,
            habits: n,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_for_one_key_writes_once_with_last_value() {
        let store = Arc::new(RecordingStore::default());
        let debouncer = ProgressDebouncer::new(store.clone(), DEFAULT_SYNC_DELAY);
        let date = key("2024-04-01");

        for n in 1..=5 {
            debouncer.schedule(1, date, habits(n)).await;
        }
        assert_eq!(debouncer.pending_count().await, 1);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(store.writes().is_empty(), "nothing before the quiet period");

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(store.writes(), vec![(1, date, habits(5))]);
        assert_eq!(debouncer.pending_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn different_keys_write_independently() {
        let store = Arc::new(RecordingStore::default());
        let debouncer = ProgressDebouncer::new(store.clone(), DEFAULT_SYNC_DELAY);
        let monday = key("2024-04-01");
        let tuesday = key("2024-04-02");

        debouncer.schedule(1, monday, habits(1)).await;
        debouncer.schedule(1, tuesday, habits(2)).await;
        debouncer.schedule(2, monday, habits(3)).await;

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let mut writes = store.writes();
        writes.sort_by_key(|(user, date, _)| (*user, *date));
        assert_eq!(
            writes,
            vec![(1, monday, habits(1)), (1, tuesday, habits(2)), (2, monday, habits(3))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_restarts_the_timer() {
        let store = Arc::new(RecordingStore::default());
        let debouncer = ProgressDebouncer::new(store.clone(), DEFAULT_SYNC_DELAY);
        let date = key("2024-04-01");

        debouncer.schedule(1, date, habits(1)).await;
        tokio::time::sleep(Duration::from_millis(800)).await;
        debouncer.schedule(1, date, habits(2)).await;
        tokio::time::sleep(Duration::from_millis(800)).await;
        assert!(store.writes().is_empty());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(store.writes(), vec![(1, date, habits(2))]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_write_is_swallowed() {
        let store = Arc::new(RecordingStore {
            fail_writes: true,
            ..Default::default()
        });
        let debouncer = ProgressDebouncer::new(store.clone(), DEFAULT_SYNC_DELAY);

        debouncer.schedule(1, key("2024-04-01"), habits(1)).await;
        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(store.writes().len(), 1, "attempted exactly once, no retry");
        assert_eq!(debouncer.pending_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn flush_all_writes_pending_once() {
        let store = Arc::new(RecordingStore::default());
        let debouncer = ProgressDebouncer::new(store.clone(), DEFAULT_SYNC_DELAY);
        let date = key("2024-04-01");

        debouncer.schedule(1, date, habits(1)).await;
        debouncer.schedule(1, date, habits(4)).await;
        debouncer.schedule(2, date, habits(7)).await;

        assert_eq!(debouncer.flush_all().await, 2);
        assert_eq!(debouncer.pending_count().await, 0);
        assert_eq!(store.writes().len(), 2);

        // The cancelled timers must not write again.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(store.writes().len(), 2);
        assert!(store.writes().contains(&(1, date, habits(4))));
        assert!(store.writes().contains(&(2, date, habits(7))));
    }
}
