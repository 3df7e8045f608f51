//! Summary command: total hours for every project.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use timed_core::{Report, Summary};
use timed_log::LogStore;

use super::report::format_report_json;

/// Formats one row per project: `  - work: 1h30m`.
pub fn format_summary(summary: &Summary) -> String {
    format_rows(summary, "  ")
}

/// Formats project rows with the given indent.
pub(super) fn format_rows(summary: &Summary, indent: &str) -> String {
    let mut output = String::new();
    for row in &summary.projects {
        writeln!(output, "{indent}- {}: {}", row.project, row.elapsed()).unwrap();
    }
    output
}

pub fn run<W: Write>(
    writer: &mut W,
    store: &LogStore,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let entries = store.read()?;
    let summary = timed_core::summary(&entries, now);

    if json {
        let output = format_report_json(&Report::Summary(summary), now)?;
        writeln!(writer, "{output}")?;
    } else {
        write!(writer, "{}", format_summary(&summary))?;
    }

    Ok(())
}
