//! Canonical `yyyy-MM-dd` keys for per-day records.
//!
//! A [`DateKey`] only ever holds a value that round-trips through its string
//! form, so `"2024-3-7"` or `"2024-03-07T00:00"` are rejected at the boundary.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Format string for the canonical date key.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Number of days covered by the weekly progress view (today included).
pub const WEEK_LENGTH_DAYS: i64 = 7;

/// A calendar day identified by its `yyyy-MM-dd` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// The current UTC calendar day.
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// The underlying date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The seven days ending at `self`, oldest first.
    pub fn week_ending(self) -> Vec<DateKey> {
        (0..WEEK_LENGTH_DAYS)
            .rev()
            .map(|offset| DateKey(self.0 - Duration::days(offset)))
            .collect()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("'{s}' is not a yyyy-MM-dd date key"));

        let date = NaiveDate::parse_from_str(s, DATE_KEY_FORMAT).map_err(|_| invalid())?;

        // chrono accepts unpadded fields; the key must be canonical.
        if date.format(DATE_KEY_FORMAT).to_string() != s {
            return Err(invalid());
        }

        Ok(Self(date))
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
