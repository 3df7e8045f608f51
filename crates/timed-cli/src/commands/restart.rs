//! Restart command: resume the most recent project.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use timed_core::tracker;
use timed_log::LogStore;

use super::start::write_started;

pub fn run<W: Write>(writer: &mut W, store: &LogStore, now: NaiveDateTime) -> Result<()> {
    let _lock = store.lock()?;
    let mut entries = store.read()?;
    let entry = tracker::restart(&mut entries, now)?;
    store.save(&entries)?;

    write_started(writer, &entry)
}
