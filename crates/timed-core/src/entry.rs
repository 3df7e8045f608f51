//! Time entries - one recorded work interval.

use chrono::{NaiveDateTime, Timelike};

use crate::elapsed::{self, Elapsed};
use crate::types::Project;

/// One row of tracked work.
///
/// An entry without an `end` is open: work on it is still in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    /// The project worked on.
    pub project: Project,

    /// When work started (local wall-clock time).
    pub start: NaiveDateTime,

    /// When work stopped, if it has.
    pub end: Option<NaiveDateTime>,
}

impl TimeEntry {
    /// Creates an open entry starting at `start`.
    pub fn open(project: Project, start: NaiveDateTime) -> Self {
        Self {
            project,
            start,
            end: None,
        }
    }

    /// Creates a closed entry.
    pub fn closed(project: Project, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            project,
            start,
            end: Some(end),
        }
    }

    /// Returns true if the entry has no end yet.
    pub const fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// End of the entry, or `now` if it is still open.
    pub fn end_or(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.end.unwrap_or(now)
    }

    /// Whole minutes worked, measuring open entries against `now`.
    ///
    /// An end before the start counts as zero.
    pub fn minutes(&self, now: NaiveDateTime) -> i64 {
        elapsed::minutes_between(self.start, self.end_or(now))
    }

    /// Elapsed time of the entry, measuring open entries against `now`.
    pub fn elapsed(&self, now: NaiveDateTime) -> Elapsed {
        elapsed::elapsed(self.start, self.end_or(now))
    }
}

/// Drops seconds and sub-second precision, matching what the log can store.
pub fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}
