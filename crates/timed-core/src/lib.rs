//! Core domain logic for the timed time tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Entries: projects and the intervals worked on them
//! - Aggregation: per-project totals, optionally bucketed by calendar period
//! - Tracking: the start/stop/restart transitions on the entry ledger

mod aggregate;
pub mod elapsed;
mod entry;
pub mod period;
pub mod tracker;
mod types;

pub use aggregate::{PeriodTotal, ProjectTotal, Report, Summary, report, summary};
pub use elapsed::{Elapsed, elapsed};
pub use entry::{TimeEntry, truncate_to_minute};
pub use period::Bucket;
pub use tracker::{Status, Stopped, TrackError};
pub use types::{Project, ValidationError};
