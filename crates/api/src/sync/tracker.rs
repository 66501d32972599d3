//! Per-user in-memory progress, synced to the store through the debouncer.
//!
//! A day stays in memory only until its latest value is stored. After a
//! successful write the day is released, and a user with no unsynced days
//! is dropped entirely, so memory tracks pending work rather than every user
//! ever seen.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stillwater_core::date_key::DateKey;
use stillwater_core::error::CoreError;
use stillwater_core::progress::{DayProgress, ProgressSnapshot};
use stillwater_core::types::DbId;
use tokio::sync::RwLock;

use crate::sync::debouncer::{ProgressDebouncer, ProgressStore};

type Snapshots = Arc<RwLock<HashMap<DbId, ProgressSnapshot>>>;

/// Holds each active user's [`ProgressSnapshot`] and schedules a debounced
/// write whenever one changes.
pub struct ProgressTracker {
    snapshots: Snapshots,
    store: Arc<dyn ProgressStore>,
    debouncer: ProgressDebouncer,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn ProgressStore>, sync_delay: Duration) -> Self {
        let snapshots: Snapshots = Arc::default();
        let releasing = ReleaseOnSync {
            inner: Arc::clone(&store),
            snapshots: Arc::clone(&snapshots),
        };

        Self {
            snapshots,
            debouncer: ProgressDebouncer::new(Arc::new(releasing), sync_delay),
            store,
        }
    }

    /// Record a habit being checked (`true`) or un-checked (`false`).
    pub async fn log_habit(
        &self,
        user_id: DbId,
        date: DateKey,
        completed: bool,
    ) -> Result<DayProgress, CoreError> {
        self.apply(user_id, date, |s| Ok(s.log_habit(date, completed)))
            .await
    }

    /// Record a finished meditation session.
    pub async fn log_meditation(
        &self,
        user_id: DbId,
        date: DateKey,
        minutes: u32,
    ) -> Result<DayProgress, CoreError> {
        self.apply(user_id, date, |s| s.log_meditation(date, minutes))
            .await
    }

    /// The user's unsynced days (empty once everything is stored).
    pub async fn snapshot(&self, user_id: DbId) -> ProgressSnapshot {
        self.snapshots
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace stored days in `week` with any fresher in-memory values.
    pub async fn overlay(
        &self,
        user_id: DbId,
        mut week: BTreeMap<DateKey, DayProgress>,
    ) -> BTreeMap<DateKey, DayProgress> {
        let snapshot = self.snapshot(user_id).await;
        for (date, progress) in week.iter_mut() {
            if snapshot.contains(date) {
                *progress = snapshot.day(date);
            }
        }
        week
    }

    /// Drop a user's snapshot, e.g. on logout. Pending writes still go out.
    pub async fn forget_user(&self, user_id: DbId) {
        self.snapshots.write().await.remove(&user_id);
    }

    /// Write every pending update immediately. Used on shutdown.
    pub async fn flush(&self) -> usize {
        self.debouncer.flush_all().await
    }

    /// Number of days waiting to be synced.
    pub async fn pending_writes(&self) -> usize {
        self.debouncer.pending_count().await
    }

    async fn apply<F>(&self, user_id: DbId, date: DateKey, update: F) -> Result<DayProgress, CoreError>
    where
        F: FnOnce(&ProgressSnapshot) -> Result<ProgressSnapshot, CoreError>,
    {
        let loaded = self.load_if_missing(user_id, date).await;

        // Scheduling under the write lock keeps the debounced value in step
        // with the snapshot when two requests race on the same day.
        let mut snapshots = self.snapshots.write().await;
        let current = snapshots.get(&user_id).cloned().unwrap_or_default();

        let base = match loaded {
            Some(progress) if !current.contains(&date) => current.with_day(date, progress),
            _ => current,
        };

        let next = update(&base)?;
        let day = next.day(&date);
        snapshots.insert(user_id, next);

        self.debouncer.schedule(user_id, date, day).await;
        Ok(day)
    }

    /// Fetch the record for a day the snapshot has not seen yet, preferring a
    /// write that is still pending over the stored row.
    ///
    /// A failed read counts as an empty day.
    async fn load_if_missing(&self, user_id: DbId, date: DateKey) -> Option<DayProgress> {
        let known = self
            .snapshots
            .read()
            .await
            .get(&user_id)
            .is_some_and(|s| s.contains(&date));
        if known {
            return None;
        }
        if let Some(pending) = self.debouncer.pending_value(user_id, date).await {
            return Some(pending);
        }

        match self.store.load_day(user_id, date).await {
            Ok(stored) => Some(stored.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(user_id, %date, error = %e, "Could not load stored progress");
                Some(DayProgress::default())
            }
        }
    }
}

/// Store handed to the debouncer. After a successful write it releases the
/// day from memory, unless the user has changed it since.
struct ReleaseOnSync {
    inner: Arc<dyn ProgressStore>,
    snapshots: Snapshots,
}

#[async_trait]
impl ProgressStore for ReleaseOnSync {
    async fn load_day(&self, user_id: DbId, date: DateKey) -> Result<Option<DayProgress>, CoreError> {
        self.inner.load_day(user_id, date).await
    }

    async fn save_day(
        &self,
        user_id: DbId,
        date: DateKey,
        progress: DayProgress,
    ) -> Result<(), CoreError> {
        self.inner.save_day(user_id, date, progress).await?;

        // A newer value differs from the one just written and stays. An equal
        // value is either stored or pending, and hydration finds it in both.
        let mut snapshots = self.snapshots.write().await;
        let remaining = snapshots
            .get(&user_id)
            .filter(|s| s.contains(&date) && s.day(&date) == progress)
            .map(|s| s.without_day(&date));

        if let Some(remaining) = remaining {
            if remaining.is_empty() {
                snapshots.remove(&user_id);
            } else {
                snapshots.insert(user_id, remaining);
            }
            tracing::trace!(user_id, %date, "Released synced progress");
        }
        Ok(())
    }
}
