//! Start command: begin tracking a project.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use timed_core::{Project, TimeEntry, tracker};
use timed_log::LogStore;

use super::format_time;

/// Writes the confirmation shared by `start` and `restart`.
pub(super) fn write_started<W: Write>(writer: &mut W, entry: &TimeEntry) -> Result<()> {
    writeln!(writer, "starting work on {}", entry.project)?;
    writeln!(writer, "  at {}", format_time(entry.start))?;
    Ok(())
}

pub fn run<W: Write>(
    writer: &mut W,
    store: &LogStore,
    project: &str,
    now: NaiveDateTime,
) -> Result<()> {
    let project = Project::new(project).context("invalid project name")?;

    let _lock = store.lock()?;
    let mut entries = store.read()?;
    let entry = tracker::start(&mut entries, project, now)?;
    store.save(&entries)?;

    write_started(writer, &entry)
}
