//! Whole-minute durations.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

/// A duration truncated to whole minutes, split into hours and minutes.
///
/// Rendered as `1h30m`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Elapsed {
    pub hours: i64,
    pub minutes: i64,
}

impl Elapsed {
    /// Builds an `Elapsed` from a minute count. Negative counts become zero.
    pub const fn from_minutes(total: i64) -> Self {
        let total = if total < 0 { 0 } else { total };
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    /// Total minutes represented.
    pub const fn total_minutes(&self) -> i64 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h{}m", self.hours, self.minutes)
    }
}

/// Whole minutes between `start` and `end`, clamped at zero.
///
/// Seconds below a full minute are dropped.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes().max(0)
}

/// Elapsed time between `start` and `end`.
///
/// An `end` earlier than `start` yields `0h0m`.
pub fn elapsed(start: NaiveDateTime, end: NaiveDateTime) -> Elapsed {
    Elapsed::from_minutes(minutes_between(start, end))
}
