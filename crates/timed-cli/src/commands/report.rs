//! Report command: project totals grouped by day, week, month or year.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use timed_core::{Bucket, Elapsed, Project, Report, Summary};
use timed_log::LogStore;

use super::summary::{format_rows, format_summary};

/// Formats the human-readable report.
///
/// Each period gets a header with its total, followed by one row per
/// project. Periods are separated by a blank line.
pub fn format_report(report: &Report) -> String {
    let periods = match report {
        Report::Summary(summary) => return format_summary(summary),
        Report::Periods { periods, .. } => periods,
    };

    let mut output = String::new();
    for (idx, period) in periods.iter().enumerate() {
        if idx > 0 {
            writeln!(output).unwrap();
        }
        writeln!(output, "{} - {}", period.key, period.summary.elapsed()).unwrap();
        output.push_str(&format_rows(&period.summary, "    "));
    }
    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<Bucket>,
    pub total_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<JsonProject<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periods: Option<Vec<JsonPeriod<'a>>>,
}

#[derive(Debug, Serialize)]
pub struct JsonPeriod<'a> {
    pub key: &'a str,
    pub total_minutes: i64,
    pub projects: Vec<JsonProject<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonProject<'a> {
    pub project: &'a Project,
    pub total_minutes: i64,
    #[serde(flatten)]
    pub elapsed: Elapsed,
}

fn json_projects(summary: &Summary) -> Vec<JsonProject<'_>> {
    summary
        .projects
        .iter()
        .map(|row| JsonProject {
            project: &row.project,
            total_minutes: row.total_minutes,
            elapsed: row.elapsed(),
        })
        .collect()
}

/// Formats a report as JSON.
pub fn format_report_json(report: &Report, generated_at: NaiveDateTime) -> Result<String> {
    let mut json = JsonReport {
        generated_at: generated_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        bucket: None,
        total_minutes: report.total_minutes(),
        projects: None,
        periods: None,
    };

    match report {
        Report::Summary(summary) => json.projects = Some(json_projects(summary)),
        Report::Periods { bucket, periods } => {
            json.bucket = Some(*bucket);
            json.periods = Some(
                periods
                    .iter()
                    .map(|period| JsonPeriod {
                        key: &period.key,
                        total_minutes: period.summary.total_minutes(),
                        projects: json_projects(&period.summary),
                    })
                    .collect(),
            );
        }
    }

    Ok(serde_json::to_string_pretty(&json)?)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: Write>(
    writer: &mut W,
    store: &LogStore,
    bucket: Option<Bucket>,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let entries = store.read()?;
    let report = timed_core::report(&entries, bucket, now);

    if json {
        let output = format_report_json(&report, now)?;
        writeln!(writer, "{output}")?;
    } else {
        write!(writer, "{}", format_report(&report))?;
    }

    Ok(())
}
