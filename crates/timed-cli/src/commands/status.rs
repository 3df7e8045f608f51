//! Status command: what is being tracked right now.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use timed_core::{Status, tracker};
use timed_log::LogStore;

use super::format_time;
use super::summary::format_summary;

/// Formats the status.
///
/// Quiet mode prints only the active project's name, and nothing at all
/// when no project is running.
pub fn format_status(status: &Status, quiet: bool) -> String {
    let mut output = String::new();
    match (status, quiet) {
        (Status::Active { entry, .. }, true) => {
            writeln!(output, "{}", entry.project).unwrap();
        }
        (
            Status::Active {
                entry,
                now,
                elapsed,
            },
            false,
        ) => {
            writeln!(output, "working on {}:", entry.project).unwrap();
            writeln!(output, "  from    {}", format_time(entry.start)).unwrap();
            writeln!(output, "  to now, {}", format_time(*now)).unwrap();
            writeln!(output, "       => {elapsed} have elapsed").unwrap();
        }
        (Status::Idle(summary), false) => output.push_str(&format_summary(summary)),
        (Status::Empty, false) => writeln!(output, "log empty").unwrap(),
        (Status::Idle(_) | Status::Empty, true) => {}
    }
    output
}

pub fn run<W: Write>(
    writer: &mut W,
    store: &LogStore,
    now: NaiveDateTime,
    quiet: bool,
) -> Result<()> {
    let entries = store.read()?;
    let status = tracker::status(&entries, now);
    write!(writer, "{}", format_status(&status, quiet))?;
    Ok(())
}
