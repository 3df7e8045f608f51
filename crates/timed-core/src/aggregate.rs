//! Aggregation of time entries into per-project totals.
//!
//! [`summary`] totals every project over the whole log. [`report`] first
//! assigns each entry to a calendar period by its start time, then totals
//! projects within each period. Both measure open entries against a single
//! `now` captured by the caller.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::elapsed::Elapsed;
use crate::entry::TimeEntry;
use crate::period::Bucket;
use crate::types::Project;

/// Total time spent on one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTotal {
    pub project: Project,
    pub total_minutes: i64,
}

impl ProjectTotal {
    /// Total as hours and minutes.
    pub const fn elapsed(&self) -> Elapsed {
        Elapsed::from_minutes(self.total_minutes)
    }
}

/// Per-project totals, sorted by project name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub projects: Vec<ProjectTotal>,
}

impl Summary {
    /// Sum of all project totals in minutes.
    pub fn total_minutes(&self) -> i64 {
        self.projects.iter().map(|p| p.total_minutes).sum()
    }

    /// Grand total as hours and minutes.
    pub fn elapsed(&self) -> Elapsed {
        Elapsed::from_minutes(self.total_minutes())
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn from_totals(totals: BTreeMap<&Project, i64>) -> Self {
        Self {
            projects: totals
                .into_iter()
                .map(|(project, total_minutes)| ProjectTotal {
                    project: project.clone(),
                    total_minutes,
                })
                .collect(),
        }
    }
}

/// Totals for one calendar period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTotal {
    /// Period key, e.g. `2024-01` for a month.
    pub key: String,
    pub summary: Summary,
}

/// Output of [`report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// No period selected; plain per-project totals.
    Summary(Summary),
    /// Totals grouped by period, periods sorted by key.
    Periods {
        bucket: Bucket,
        periods: Vec<PeriodTotal>,
    },
}

impl Report {
    /// Grand total across every period.
    pub fn total_minutes(&self) -> i64 {
        match self {
            Self::Summary(summary) => summary.total_minutes(),
            Self::Periods { periods, .. } => {
                periods.iter().map(|p| p.summary.total_minutes()).sum()
            }
        }
    }
}

fn accumulate<'a>(
    totals: &mut BTreeMap<&'a Project, i64>,
    entry: &'a TimeEntry,
    now: NaiveDateTime,
) {
    *totals.entry(&entry.project).or_insert(0) += entry.minutes(now);
}

/// Totals every project in `entries`.
///
/// Open entries count up to `now`.
pub fn summary(entries: &[TimeEntry], now: NaiveDateTime) -> Summary {
    let mut totals = BTreeMap::new();
    for entry in entries {
        accumulate(&mut totals, entry, now);
    }
    Summary::from_totals(totals)
}

/// Totals projects per calendar period.
///
/// Each entry belongs to exactly one period, chosen by its start time, even
/// when it runs past the end of that period. Without a bucket this is the
/// same as [`summary`].
pub fn report(entries: &[TimeEntry], bucket: Option<Bucket>, now: NaiveDateTime) -> Report {
    let Some(bucket) = bucket else {
        return Report::Summary(summary(entries, now));
    };

    let mut periods: BTreeMap<String, BTreeMap<&Project, i64>> = BTreeMap::new();
    for entry in entries {
        let key = bucket.key(entry.start);
        accumulate(periods.entry(key).or_default(), entry, now);
    }

    tracing::debug!(%bucket, periods = periods.len(), "built report");

    Report::Periods {
        bucket,
        periods: periods
            .into_iter()
            .map(|(key, totals)| PeriodTotal {
                key,
                summary: Summary::from_totals(totals),
            })
            .collect(),
    }
}
