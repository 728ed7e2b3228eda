// src/ledger/conflicts.rs

//! Conflict resolution for attempt writes.
//!
//! Two rules are evaluated together against the course's current ledger:
//!
//! - **Earlier pass superseded**: writing a passing grade at a slot turns
//!   every other passing attempt strictly before it into a
//!   [`Grade::SUPERSEDED_FAIL`] attempt. The rewritten attempts stay in the
//!   ledger as history.
//! - **Back-dating truncates the future**: writing any grade at a slot
//!   removes every attempt strictly after it.
//!
//! [`plan_attempt`] is the pure preview; [`commit_attempt`] applies a plan
//! in one step.

use tracing::{debug, info, warn};

use crate::graph::{AttemptId, Course};
use crate::ledger::attempts::{latest_passing_attempt, write_slot};
use crate::ledger::Grade;
use crate::timeline::YearTerm;

/// Everything a single attempt write would do to a course's ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptPlan {
    /// Target slot of the write.
    pub slot: YearTerm,
    /// Grade to be written at `slot`.
    pub grade: Grade,
    /// Earlier passing attempts that would be rewritten to the
    /// superseded-fail grade.
    pub superseded: Vec<YearTerm>,
    /// Later attempts that would be deleted.
    pub removed: Vec<YearTerm>,
    /// Whether `slot` already holds an attempt (update in place).
    pub replaces_existing: bool,
}

impl AttemptPlan {
    /// Whether the write touches any attempt besides its own slot.
    ///
    /// Interactive callers use this to decide if a confirmation is needed.
    pub fn is_disruptive(&self) -> bool {
        !self.superseded.is_empty() || !self.removed.is_empty()
    }
}

/// Preview writing `grade` at `slot` on `course`.
pub fn plan_attempt(course: &Course, slot: YearTerm, grade: Grade) -> AttemptPlan {
    let mut superseded = Vec::new();
    let mut removed = Vec::new();
    let mut replaces_existing = false;

    for attempt in &course.attempts {
        if attempt.slot == slot {
            replaces_existing = true;
        } else if attempt.slot > slot {
            removed.push(attempt.slot);
        } else if grade.is_passing() && attempt.is_passing() {
            superseded.push(attempt.slot);
        }
    }

    superseded.sort();
    removed.sort();

    AttemptPlan {
        slot,
        grade,
        superseded,
        removed,
        replaces_existing,
    }
}

/// Apply `plan` to `course` and return the id of the written attempt.
///
/// After truncation the target is the latest attempt, so `last_taken`
/// never points past it: it moves to the target slot when
/// `update_last_taken` is set or when it pointed at a removed slot.
pub fn commit_attempt(course: &mut Course, plan: &AttemptPlan, update_last_taken: bool) -> AttemptId {
    for attempt in course.attempts.iter_mut() {
        if plan.superseded.contains(&attempt.slot) && attempt.is_passing() {
            attempt.superseded_from = Some(attempt.grade);
            attempt.grade = Grade::SUPERSEDED_FAIL;
        }
    }

    if !plan.removed.is_empty() {
        course.attempts.retain(|a| !plan.removed.contains(&a.slot));
    }

    let id = write_slot(course, plan.slot, plan.grade);

    let pointed_past = course.last_taken.is_some_and(|last| last > plan.slot);
    if update_last_taken || pointed_past {
        course.last_taken = Some(plan.slot);
    }

    info!(
        course = %course.id,
        slot = %plan.slot,
        grade = %plan.grade,
        superseded = plan.superseded.len(),
        removed = plan.removed.len(),
        "attempt committed"
    );

    id
}

/// Normalize, plan and commit a write in one call.
///
/// Returns the applied plan, or `None` (and changes nothing) when the
/// grade is not on the scale.
pub fn record_attempt(
    course: &mut Course,
    slot: YearTerm,
    grade: &str,
    update_last_taken: bool,
) -> Option<AttemptPlan> {
    let Some(parsed) = Grade::parse(grade) else {
        warn!(course = %course.id, %slot, input = grade, "invalid grade; ignoring write");
        return None;
    };

    let plan = plan_attempt(course, slot, parsed);
    commit_attempt(course, &plan, update_last_taken);
    Some(plan)
}

/// Grade choices a caller should offer for a write at a given slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeChoices {
    /// The whole scale.
    All,
    /// Only failing grades: `slot` precedes the latest recorded pass at
    /// `cutoff`, and a retroactive pass is not allowed.
    FailingOnly { cutoff: YearTerm },
}

impl GradeChoices {
    pub fn allows(self, grade: Grade) -> bool {
        match self {
            GradeChoices::All => true,
            GradeChoices::FailingOnly { .. } => grade.is_failing(),
        }
    }

    pub fn grades(self) -> Vec<Grade> {
        Grade::all().filter(|g| self.allows(*g)).collect()
    }
}

/// Which grades may be offered for a write at `slot`.
///
/// The ledger does not enforce this itself: [`commit_attempt`] accepts a
/// passing grade anywhere. Callers filter with this before writing.
pub fn grade_choices(course: &Course, slot: YearTerm) -> GradeChoices {
    match latest_passing_attempt(course) {
        Some(latest) if slot < latest.slot => {
            debug!(
                course = %course.id,
                %slot,
                cutoff = %latest.slot,
                "slot precedes latest pass; restricting to failing grades"
            );
            GradeChoices::FailingOnly {
                cutoff: latest.slot,
            }
        }
        _ => GradeChoices::All,
    }
}
