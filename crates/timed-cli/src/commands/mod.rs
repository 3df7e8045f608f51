//! CLI subcommand implementations.

pub mod report;
pub mod restart;
pub mod start;
pub mod status;
pub mod stop;
pub mod summary;

use chrono::NaiveDateTime;
use timed_log::TIME_FORMAT;

/// Formats a timestamp the way the log stores it.
fn format_time(at: NaiveDateTime) -> String {
    at.format(TIME_FORMAT).to_string()
}
