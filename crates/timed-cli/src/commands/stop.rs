//! Stop command: close the running entry.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use timed_core::tracker;
use timed_log::LogStore;

use super::format_time;

pub fn run<W: Write>(writer: &mut W, store: &LogStore, now: NaiveDateTime) -> Result<()> {
    let _lock = store.lock()?;
    let mut entries = store.read()?;
    let stopped = tracker::stop(&mut entries, now)?;
    store.save(&entries)?;

    let entry = &stopped.entry;
    writeln!(writer, "worked on {}", entry.project)?;
    writeln!(writer, "  from    {}", format_time(entry.start))?;
    writeln!(writer, "  to now, {}", format_time(entry.end_or(now)))?;
    writeln!(writer, "       => {} elapsed", stopped.elapsed)?;
    Ok(())
}
