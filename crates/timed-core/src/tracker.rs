//! State transitions on the entry ledger: start, stop, restart, status.
//!
//! Entries form an append-only ledger in which only the last entry may be
//! open. Every transition checks that invariant and refuses to break it, so
//! starting while something is already running is an error rather than a
//! silently abandoned entry.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::aggregate::{self, Summary};
use crate::elapsed::Elapsed;
use crate::entry::{TimeEntry, truncate_to_minute};
use crate::types::Project;

/// Errors from tracking transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// There is nothing running to stop, or nothing to restart.
    #[error("no active project")]
    NoActiveProject,

    /// A project is already being tracked.
    #[error("already working on {project}; stop it first")]
    AlreadyActive { project: Project },
}

/// The open entry at the end of the ledger, if any.
pub fn active(entries: &[TimeEntry]) -> Option<&TimeEntry> {
    entries.last().filter(|e| e.is_open())
}

fn ensure_idle(entries: &[TimeEntry]) -> Result<(), TrackError> {
    match active(entries) {
        Some(entry) => Err(TrackError::AlreadyActive {
            project: entry.project.clone(),
        }),
        None => Ok(()),
    }
}

/// Starts tracking `project` at `now`.
///
/// Fails with [`TrackError::AlreadyActive`] if the last entry is still open.
/// Returns the new entry.
pub fn start(
    entries: &mut Vec<TimeEntry>,
    project: Project,
    now: NaiveDateTime,
) -> Result<TimeEntry, TrackError> {
    ensure_idle(entries)?;
    let entry = TimeEntry::open(project, truncate_to_minute(now));
    tracing::info!(project = %entry.project, start = %entry.start, "started");
    entries.push(entry.clone());
    Ok(entry)
}

/// A closed entry along with how long it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopped {
    pub entry: TimeEntry,
    pub elapsed: Elapsed,
}

/// Stops the open entry at `now`.
///
/// Fails with [`TrackError::NoActiveProject`] if the ledger is empty or the
/// last entry is already closed.
pub fn stop(entries: &mut [TimeEntry], now: NaiveDateTime) -> Result<Stopped, TrackError> {
    let Some(last) = entries.last_mut().filter(|e| e.is_open()) else {
        return Err(TrackError::NoActiveProject);
    };
    last.end = Some(truncate_to_minute(now));
    let elapsed = last.elapsed(now);
    tracing::info!(project = %last.project, %elapsed, "stopped");
    Ok(Stopped {
        entry: last.clone(),
        elapsed,
    })
}

/// Starts a new entry for the project of the last entry.
///
/// Fails with [`TrackError::NoActiveProject`] on an empty ledger, and with
/// [`TrackError::AlreadyActive`] if the last entry is still open.
pub fn restart(entries: &mut Vec<TimeEntry>, now: NaiveDateTime) -> Result<TimeEntry, TrackError> {
    let project = entries
        .last()
        .map(|e| e.project.clone())
        .ok_or(TrackError::NoActiveProject)?;
    start(entries, project, now)
}

/// What the ledger currently looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Nothing has ever been tracked.
    Empty,
    /// The last entry is open.
    Active {
        entry: TimeEntry,
        now: NaiveDateTime,
        elapsed: Elapsed,
    },
    /// Nothing is running; totals for every project.
    Idle(Summary),
}

/// Inspects the last entry of the ledger.
pub fn status(entries: &[TimeEntry], now: NaiveDateTime) -> Status {
    match entries.last() {
        None => Status::Empty,
        Some(last) if last.is_open() => Status::Active {
            entry: last.clone(),
            now,
            elapsed: last.elapsed(now),
        },
        Some(_) => Status::Idle(aggregate::summary(entries, now)),
    }
}
