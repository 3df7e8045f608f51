//! Calendar periods used to bucket report output.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Calendar period a report groups entries by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Day,
    Week,
    Month,
    Year,
}

impl Bucket {
    /// Key of the period containing `start`.
    ///
    /// Keys sort lexicographically in chronological order:
    /// - day: `2024-01-31`
    /// - week: `2024-01-29 to 2024-02-04` (Monday through Sunday)
    /// - month: `2024-01`
    /// - year: `2024`
    pub fn key(self, start: NaiveDateTime) -> String {
        let date = start.date();
        match self {
            Self::Day => date.format("%Y-%m-%d").to_string(),
            Self::Week => {
                let (monday, sunday) = week_bounds(date);
                format!(
                    "{} to {}",
                    monday.format("%Y-%m-%d"),
                    sunday.format("%Y-%m-%d")
                )
            }
            Self::Month => date.format("%Y-%m").to_string(),
            Self::Year => date.format("%Y").to_string(),
        }
    }

    /// Lowercase name of the period.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// First (Monday) and last (Sunday) day of the ISO week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_since_monday = date.weekday().num_days_from_monday();
    let monday = date - Duration::days(i64::from(days_since_monday));
    (monday, monday + Duration::days(6))
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
