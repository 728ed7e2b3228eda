use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Canonical course identifier used throughout the engine.
pub type CourseId = String;

/// Academic term within a year.
///
/// Declaration order is chronological order; `index()` feeds the
/// year-term ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    Term1,
    Term2,
    Term3,
}

impl Term {
    /// All terms in chronological order.
    pub const ALL: [Term; 3] = [Term::Term1, Term::Term2, Term::Term3];

    /// Number of terms in one academic year.
    pub const PER_YEAR: u32 = 3;

    /// Zero-based position of this term within the year.
    pub fn index(self) -> u32 {
        match self {
            Term::Term1 => 0,
            Term::Term2 => 1,
            Term::Term3 => 2,
        }
    }

    /// The term after this one, or `None` after the last term of the year.
    pub fn succ(self) -> Option<Term> {
        match self {
            Term::Term1 => Some(Term::Term2),
            Term::Term2 => Some(Term::Term3),
            Term::Term3 => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Term::Term1 => "term1",
            Term::Term2 => "term2",
            Term::Term3 => "term3",
        };
        f.write_str(s)
    }
}

impl FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "term1" | "1" => Ok(Term::Term1),
            "term2" | "2" => Ok(Term::Term2),
            "term3" | "3" => Ok(Term::Term3),
            other => Err(format!(
                "invalid term: {other} (expected \"term1\", \"term2\" or \"term3\")"
            )),
        }
    }
}

/// Progress status of a course.
///
/// - `Pending`: not started (also where a regressed course lands).
/// - `Active`: currently being taken.
/// - `Passed`: completed.
///
/// Ordering is `Pending < Active < Passed`; there is no failure state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Pending,
    Active,
    Passed,
}

impl CourseStatus {
    /// Whether a course at `self` already meets `required`.
    pub fn satisfies(self, required: CourseStatus) -> bool {
        self >= required
    }
}

impl Default for CourseStatus {
    fn default() -> Self {
        CourseStatus::Pending
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CourseStatus::Pending => "pending",
            CourseStatus::Active => "active",
            CourseStatus::Passed => "passed",
        };
        f.write_str(s)
    }
}

impl FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(CourseStatus::Pending),
            "active" => Ok(CourseStatus::Active),
            "passed" => Ok(CourseStatus::Passed),
            other => Err(format!(
                "invalid course status: {other} (expected \"pending\", \"active\" or \"passed\")"
            )),
        }
    }
}
