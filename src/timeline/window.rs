// src/timeline/window.rs

//! Attempt windows: when may a course receive a grade?

use tracing::debug;

use crate::graph::{Course, CourseGraph};
use crate::ledger::{attempt_at, latest_passing_attempt};
use crate::timeline::YearTerm;
use crate::types::CourseStatus;

/// The slot at which `course` counts as completed, if any.
///
/// - The latest passing attempt wins when one exists.
/// - Otherwise a `Passed` course falls back to `last_taken`, unless the
///   attempt recorded at that slot is a failing one.
pub fn completion_point(course: &Course) -> Option<YearTerm> {
    if let Some(attempt) = latest_passing_attempt(course) {
        return Some(attempt.slot);
    }

    if course.status != CourseStatus::Passed {
        return None;
    }

    let last = course.last_taken?;
    match attempt_at(course, last) {
        Some(attempt) if !attempt.is_passing() => None,
        _ => Some(last),
    }
}

/// Every slot at which `course` may legally be graded, up to `current`.
///
/// The window opens one term after the latest completion point among the
/// course's resolvable prerequisites (or at `(1, Term1)` when there are
/// none) and closes at `current`. A prerequisite without a completion
/// point closes the window entirely.
pub fn compute_attempt_window(
    course: &Course,
    current: YearTerm,
    graph: &CourseGraph,
) -> Vec<YearTerm> {
    let mut latest: Option<YearTerm> = None;

    for prereq in graph.prerequisites_of(course) {
        match completion_point(prereq) {
            Some(point) => {
                latest = Some(latest.map_or(point, |l| l.max(point)));
            }
            None => {
                debug!(
                    course = %course.id,
                    prereq = %prereq.id,
                    "prerequisite not completed; attempt window is empty"
                );
                return Vec::new();
            }
        }
    }

    let start = match latest {
        None => YearTerm::FIRST,
        Some(point) => match point.checked_next() {
            Some(start) => start,
            None => return Vec::new(),
        },
    };

    if current.year < start.year || current < start {
        debug!(
            course = %course.id,
            %start,
            %current,
            "current position precedes window start"
        );
        return Vec::new();
    }

    YearTerm::range_inclusive(start, current)
}
