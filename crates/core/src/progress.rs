//! Per-day progress counters and the immutable per-user snapshot built on them.
//!
//! Counters only move in the directions the product allows: meditation minutes
//! are additive, and the completed-habit count is clamped at zero when a habit
//! is un-checked. The habit count has no upper bound.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::error::CoreError;

/// Progress recorded for a single calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
    /// Accumulated meditation minutes.
    pub minutes: u32,
    /// Number of habits marked completed.
    pub habits: u32,
}

impl DayProgress {
    /// Apply a habit toggle: completing adds one, un-completing removes one
    /// without going below zero.
    pub fn with_habit(self, completed: bool) -> Self {
        let habits = if completed {
            self.habits.saturating_add(1)
        } else {
            self.habits.saturating_sub(1)
        };
        Self { habits, ..self }
    }

    /// Add logged meditation minutes.
    pub fn with_meditation(self, minutes: u32) -> Self {
        Self {
            minutes: self.minutes.saturating_add(minutes),
            ..self
        }
    }
}

/// A user's progress across days. Every update returns a new snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    days: BTreeMap<DateKey, DayProgress>,
}

impl ProgressSnapshot {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the snapshot holds a record for `date`.
    pub fn contains(&self, date: &DateKey) -> bool {
        self.days.contains_key(date)
    }

    /// Whether no day is recorded.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The record for `date`, or zeros if nothing has been logged.
    pub fn day(&self, date: &DateKey) -> DayProgress {
        self.days.get(date).copied().unwrap_or_default()
    }

    /// All recorded days, oldest first.
    pub fn days(&self) -> &BTreeMap<DateKey, DayProgress> {
        &self.days
    }

    /// Replace the record for `date` (used when hydrating from the store).
    pub fn with_day(&self, date: DateKey, progress: DayProgress) -> Self {
        let mut days = self.days.clone();
        days.insert(date, progress);
        Self { days }
    }

    /// Drop the record for `date`, e.g. once it is safely stored.
    pub fn without_day(&self, date: &DateKey) -> Self {
        let mut days = self.days.clone();
        days.remove(date);
        Self { days }
    }

    /// Record a habit being checked or un-checked on `date`.
    pub fn log_habit(&self, date: DateKey, completed: bool) -> Self {
        let updated = self.day(&date).with_habit(completed);
        self.with_day(date, updated)
    }

    /// Record a finished meditation of `minutes` on `date`.
    ///
    /// Zero-minute sessions are rejected; logged minutes are never retracted.
    pub fn log_meditation(&self, date: DateKey, minutes: u32) -> Result<Self, CoreError> {
        if minutes == 0 {
            return Err(CoreError::Validation(
                "Meditation minutes must be greater than zero".into(),
            ));
        }
        let updated = self.day(&date).with_meditation(minutes);
        Ok(self.with_day(date, updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn habit_toggle_clamps_at_zero() {
        let date = key("2024-05-01");
        let snapshot = ProgressSnapshot::new()
            .log_habit(date, true)
            .log_habit(date, false)
            .log_habit(date, false);

        assert_eq!(snapshot.day(&date).habits, 0);
    }

    #[test]
    fn habit_count_never_negative_from_empty() {
        let date = key("2024-05-01");
        let mut snapshot = ProgressSnapshot::new();
        for _ in 0..5 {
            snapshot = snapshot.log_habit(date, false);
        }
        assert_eq!(snapshot.day(&date), DayProgress::default());
    }

    #[test]
    fn habit_count_has_no_upper_cap() {
        let date = key("2024-05-01");
        let mut snapshot = ProgressSnapshot::new();
        for _ in 0..50 {
            snapshot = snapshot.log_habit(date, true);
        }
        assert_eq!(snapshot.day(&date).habits, 50);
    }

    #[test]
    fn meditation_minutes_accumulate() {
        let date = key("2024-05-01");
        let snapshot = ProgressSnapshot::new()
            .log_meditation(date, 10)
            .unwrap()
            .log_meditation(date, 5)
            .unwrap();

        assert_eq!(snapshot.day(&date).minutes, 15);
        assert_eq!(snapshot.day(&date).habits, 0);
    }

    #[test]
    fn zero_minute_meditation_is_rejected() {
        let result = ProgressSnapshot::new().log_meditation(key("2024-05-01"), 0);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn updates_do_not_mutate_the_previous_snapshot() {
        let date = key("2024-05-01");
        let before = ProgressSnapshot::new().log_habit(date, true);
        let after = before.log_habit(date, true);

        assert_eq!(before.day(&date).habits, 1);
        assert_eq!(after.day(&date).habits, 2);
    }

    #[test]
    fn days_are_independent() {
        let monday = key("2024-05-06");
        let tuesday = key("2024-05-07");
        let snapshot = ProgressSnapshot::new()
            .log_habit(monday, true)
            .log_meditation(tuesday, 20)
            .unwrap();

        assert_eq!(snapshot.day(&monday), DayProgress { minutes: 0, habits: 1 });
        assert_eq!(snapshot.day(&tuesday), DayProgress { minutes: 20, habits: 0 });
        assert_eq!(snapshot.days().len(), 2);
    }

    #[test]
    fn without_day_drops_only_that_day() {
        let monday = key("2024-05-06");
        let tuesday = key("2024-05-07");
        let snapshot = ProgressSnapshot::new()
            .log_habit(monday, true)
            .log_habit(tuesday, true);

        let trimmed = snapshot.without_day(&monday);
        assert!(!trimmed.contains(&monday));
        assert!(trimmed.contains(&tuesday));
        assert!(snapshot.contains(&monday));

        assert!(trimmed.without_day(&tuesday).is_empty());
    }
}
