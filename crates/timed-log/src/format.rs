//! The line format of the log.
//!
//! Each line holds one entry:
//!
//! ```text
//! work: 09:00 on 01 Jan 2024 - 10:30 on 01 Jan 2024
//! blog: 20:00 on 31 Jan 2024 -
//! ```
//!
//! The project runs up to the first `:`. The start and end are separated by
//! the literal ` - `, and an open entry keeps the separator with an empty end.

use std::fmt;

use chrono::NaiveDateTime;
use thiserror::Error;
use timed_core::{Project, TimeEntry, ValidationError};

/// Format of timestamps in the log, e.g. `09:00 on 01 Jan 2024`.
pub const TIME_FORMAT: &str = "%H:%M on %d %b %Y";

const PROJECT_SEPARATOR: char = ':';
const RANGE_SEPARATOR: &str = " - ";

/// What is wrong with a malformed log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormatKind {
    /// No `:` between the project and the time range.
    MissingProjectSeparator,
    /// No ` - ` between start and end.
    MissingRangeSeparator,
    /// Nothing before the `:`.
    EmptyProject,
    /// The project name is not allowed.
    InvalidProject(ValidationError),
    /// Nothing between the `:` and the ` - `.
    EmptyStart,
    /// A timestamp does not match [`TIME_FORMAT`].
    InvalidTimestamp(String),
    /// An entry without an end is followed by more entries.
    OpenEntryNotLast,
    /// The line is not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for LogFormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProjectSeparator => write!(f, "missing ':' after project"),
            Self::MissingRangeSeparator => write!(f, "missing ' - ' between start and end"),
            Self::EmptyProject => write!(f, "empty project"),
            Self::InvalidProject(e) => write!(f, "{e}"),
            Self::EmptyStart => write!(f, "empty start time"),
            Self::InvalidTimestamp(value) => write!(f, "invalid timestamp {value:?}"),
            Self::OpenEntryNotLast => write!(f, "open entry is not the last entry"),
            Self::InvalidUtf8 => write!(f, "invalid UTF-8"),
        }
    }
}

/// A log line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}: {text:?}")]
pub struct LogFormatError {
    /// 1-based line number.
    pub line: usize,
    pub kind: LogFormatKind,
    /// The offending line.
    pub text: String,
}

fn parse_time(value: &str) -> Result<NaiveDateTime, LogFormatKind> {
    NaiveDateTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| LogFormatKind::InvalidTimestamp(value.to_string()))
}

fn parse_fields(text: &str) -> Result<TimeEntry, LogFormatKind> {
    let (project, range) = text
        .split_once(PROJECT_SEPARATOR)
        .ok_or(LogFormatKind::MissingProjectSeparator)?;

    let project = project.trim();
    if project.is_empty() {
        return Err(LogFormatKind::EmptyProject);
    }

    let (start, end) = match range.split_once(RANGE_SEPARATOR) {
        Some(parts) => parts,
        // An open entry whose trailing space was stripped by an editor
        None => (
            range
                .trim_end()
                .strip_suffix(" -")
                .ok_or(LogFormatKind::MissingRangeSeparator)?,
            "",
        ),
    };
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() {
        return Err(LogFormatKind::EmptyStart);
    }

    let project = Project::new(project).map_err(LogFormatKind::InvalidProject)?;
    let start = parse_time(start)?;
    let end = if end.is_empty() {
        None
    } else {
        Some(parse_time(end)?)
    };

    Ok(TimeEntry {
        project,
        start,
        end,
    })
}

/// Parses one log line. `line` is the 1-based line number used in errors.
pub fn parse_line(text: &str, line: usize) -> Result<TimeEntry, LogFormatError> {
    parse_fields(text).map_err(|kind| LogFormatError {
        line,
        kind,
        text: text.to_string(),
    })
}

/// Decodes raw log bytes, reporting the line holding the first invalid byte.
pub fn decode_log(bytes: &[u8]) -> Result<&str, LogFormatError> {
    std::str::from_utf8(bytes).map_err(|e| {
        let (valid, rest) = bytes.split_at(e.valid_up_to());
        let line_start = valid.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
        let line_end = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
        LogFormatError {
            line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
            kind: LogFormatKind::InvalidUtf8,
            text: String::from_utf8_lossy(&bytes[line_start..valid.len() + line_end])
                .into_owned(),
        }
    })
}

/// Parses a whole log.
///
/// Blank lines are skipped. The first malformed line fails the whole parse;
/// nothing is skipped or reordered. Only the last entry may be open.
pub fn parse_log(content: &str) -> Result<Vec<TimeEntry>, LogFormatError> {
    let mut entries = Vec::new();
    let mut open: Option<(usize, &str)> = None;

    for (idx, text) in content.lines().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        if let Some((line, text)) = open {
            return Err(LogFormatError {
                line,
                kind: LogFormatKind::OpenEntryNotLast,
                text: text.to_string(),
            });
        }

        let entry = parse_line(text, idx + 1)?;
        if entry.is_open() {
            open = Some((idx + 1, text));
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Formats one entry as a log line, without a line terminator.
pub fn format_entry(entry: &TimeEntry) -> String {
    let end = entry
        .end
        .map(|end| end.format(TIME_FORMAT).to_string())
        .unwrap_or_default();
    format!(
        "{}{PROJECT_SEPARATOR} {}{RANGE_SEPARATOR}{end}",
        entry.project,
        entry.start.format(TIME_FORMAT)
    )
}

/// Formats a whole log: one line per entry, no trailing newline.
pub fn format_log(entries: &[TimeEntry]) -> String {
    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n")
}
