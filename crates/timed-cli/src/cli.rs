//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use timed_core::Bucket;

/// A command-line time tracker.
///
/// Records when you start and stop working on projects and reports the time
/// spent on each.
#[derive(Debug, Parser)]
#[command(name = "timed", version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Print version information and exit.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Print only the current active project.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print current status (the default).
    Status,

    /// Start tracking for <project>.
    Start {
        /// The project name.
        project: String,
    },

    /// Stop tracking for the current project.
    Stop,

    /// Restart tracking for the last project.
    Restart,

    /// Print a summary of hours for all projects.
    Summary {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print a summary of hours by day, week, month or year.
    Report(ReportArgs),
}

/// Options for `report`.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Group by day.
    #[arg(short, long, group = "period")]
    pub day: bool,

    /// Group by week (Monday to Sunday).
    #[arg(short, long, group = "period")]
    pub week: bool,

    /// Group by month.
    #[arg(short, long, group = "period")]
    pub month: bool,

    /// Group by year.
    #[arg(short, long, group = "period")]
    pub year: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ReportArgs {
    /// The selected period, if any.
    pub const fn bucket(&self) -> Option<Bucket> {
        if self.day {
            Some(Bucket::Day)
        } else if self.week {
            Some(Bucket::Week)
        } else if self.month {
            Some(Bucket::Month)
        } else if self.year {
            Some(Bucket::Year)
        } else {
            None
        }
    }
}
