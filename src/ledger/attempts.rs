// src/ledger/attempts.rs

//! Basic attempt reads and writes, without conflict resolution.

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::graph::{AttemptId, Course, GradeAttempt};
use crate::ledger::Grade;
use crate::timeline::YearTerm;

/// The attempt recorded at `slot`, if any.
pub fn attempt_at(course: &Course, slot: YearTerm) -> Option<&GradeAttempt> {
    course.attempts.iter().find(|a| a.slot == slot)
}

/// The passing attempt with the latest slot, if any.
pub fn latest_passing_attempt(course: &Course) -> Option<&GradeAttempt> {
    course
        .attempts
        .iter()
        .filter(|a| a.is_passing())
        .max_by_key(|a| a.slot)
}

/// Write `grade` at `slot`, overwriting an existing attempt there.
///
/// An unparseable or off-scale grade is a no-op and returns `None`.
/// With `update_last_taken`, `last_taken` moves to `slot` unless it
/// already points later.
pub fn upsert_attempt(
    course: &mut Course,
    slot: YearTerm,
    grade: &str,
    update_last_taken: bool,
) -> Option<AttemptId> {
    let Some(grade) = Grade::parse(grade) else {
        warn!(course = %course.id, %slot, input = grade, "invalid grade; ignoring write");
        return None;
    };

    let id = write_slot(course, slot, grade);

    if update_last_taken && course.last_taken.is_none_or(|last| slot >= last) {
        course.last_taken = Some(slot);
    }

    Some(id)
}

/// Delete the attempt at `slot`. Returns whether one was removed.
pub fn remove_attempt(course: &mut Course, slot: YearTerm) -> bool {
    let before = course.attempts.len();
    course.attempts.retain(|a| a.slot != slot);
    let removed = course.attempts.len() != before;
    if removed {
        debug!(course = %course.id, %slot, "attempt removed");
    }
    removed
}

/// Overwrite the grade at `slot` in place, or add a fresh attempt.
///
/// Attempts are kept in chronological order.
pub(crate) fn write_slot(course: &mut Course, slot: YearTerm, grade: Grade) -> AttemptId {
    if let Some(existing) = course.attempts.iter_mut().find(|a| a.slot == slot) {
        debug!(
            course = %course.id,
            %slot,
            old = %existing.grade,
            new = %grade,
            "overwriting attempt grade"
        );
        existing.grade = grade;
        existing.superseded_from = None;
        return existing.id.clone();
    }

    let attempt = GradeAttempt {
        id: Uuid::new_v4().to_string(),
        slot,
        grade,
        recorded_at: Utc::now(),
        superseded_from: None,
    };
    debug!(course = %course.id, %slot, %grade, id = %attempt.id, "appending attempt");
    let id = attempt.id.clone();
    course.attempts.push(attempt);
    course.attempts.sort_by_key(|a| a.slot);
    id
}
