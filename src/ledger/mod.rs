// src/ledger/mod.rs

//! Grade ledger: per-course chronological record of graded attempts.
//!
//! - [`grade`] defines the grade scale and its normalization.
//! - [`attempts`] holds plain reads and single-slot writes.
//! - [`conflicts`] plans and commits writes under the supersede and
//!   truncate rules.
//!
//! The ledger never validates a slot against the attempt window; that is
//! the timeline's job, and callers check it before writing.

pub mod attempts;
pub mod conflicts;
pub mod grade;

pub use attempts::{attempt_at, latest_passing_attempt, remove_attempt, upsert_attempt};
pub use conflicts::{
    commit_attempt, grade_choices, plan_attempt, record_attempt, AttemptPlan, GradeChoices,
};
pub use grade::Grade;
