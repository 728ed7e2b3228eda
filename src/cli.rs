// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::default_curriculum_path;
use crate::timeline::YearTerm;

use crate::types::{CourseStatus, Term};

/// Command-line arguments for `coursedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "coursedag",
    version,
    about = "Preview and apply prerequisite cascades and grade ledger writes for a curriculum.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the curriculum snapshot (TOML).
    ///
    /// Default: `Curriculum.toml` in the current working directory.
    #[arg(long, global = true, value_name = "PATH", default_value_os_t = default_curriculum_path())]
    pub curriculum: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `COURSEDAG_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate the curriculum and print its graph.
    Check,

    /// Print the slots in which a course may be graded.
    Window {
        /// Course id.
        course: String,

        /// Override the student's current year.
        #[arg(long, value_parser = parse_year)]
        year: Option<u32>,

        /// Override the student's current term (term1, term2, term3).
        #[arg(long)]
        term: Option<Term>,
    },

    /// Preview and apply a status change (pending, active, passed).
    Status {
        /// Course id.
        course: String,

        /// Requested status.
        status: CourseStatus,

        /// Change only this course; do not cascade to prerequisites or
        /// dependents.
        #[arg(long)]
        no_cascade: bool,
    },

    /// Preview and apply a grade attempt.
    Grade {
        /// Course id.
        course: String,

        #[arg(long, value_parser = parse_year)]
        year: u32,

        #[arg(long)]
        term: Term,

        /// Grade between 1.0 and 7.0 (a decimal comma is accepted).
        #[arg(long)]
        grade: String,

        /// Leave `last_taken` unchanged unless the write truncates past it.
        #[arg(long)]
        no_last_taken: bool,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Academic year argument, bounded like years in a curriculum file.
fn parse_year(s: &str) -> Result<u32, String> {
    let year: u32 = s.parse().map_err(|e| format!("invalid year '{s}': {e}"))?;
    if year == 0 || year > YearTerm::MAX_YEAR {
        return Err(format!("year must be between 1 and {}", YearTerm::MAX_YEAR));
    }
    Ok(year)
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
