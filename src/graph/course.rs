// src/graph/course.rs

//! Course nodes and their graded attempts.

use chrono::{DateTime, Utc};

use crate::ledger::Grade;
use crate::timeline::YearTerm;
use crate::types::{CourseId, CourseStatus, Term};

/// Identifier of a single grade attempt.
pub type AttemptId = String;

/// One graded attempt of a course in a given `(year, term)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeAttempt {
    pub id: AttemptId,
    pub slot: YearTerm,
    pub grade: Grade,
    /// When the attempt was written. Informational only; ordering always
    /// uses `slot`.
    pub recorded_at: DateTime<Utc>,
    /// Original passing grade of an attempt that was rewritten to the
    /// superseded-fail grade by a later pass.
    pub superseded_from: Option<Grade>,
}

impl GradeAttempt {
    pub fn is_passing(&self) -> bool {
        self.grade.is_passing()
    }
}

/// A course node in the curriculum graph.
///
/// Identity and placement are fixed at load time. `prerequisites` is only
/// readable so that the derived dependent index can never go stale; the
/// mutable progress state (`status`, `last_taken`, `attempts`) is public
/// and owned by the cascade resolver and the grade ledger respectively.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub name: String,
    pub credits: u32,
    /// Recommended placement in the curriculum.
    pub year: u32,
    pub term: Term,
    prerequisites: Vec<CourseId>,

    pub status: CourseStatus,
    pub last_taken: Option<YearTerm>,
    pub attempts: Vec<GradeAttempt>,
}

impl Course {
    /// Create a `Pending` course with no attempts.
    ///
    /// Duplicate prerequisite ids are collapsed, keeping first-seen order.
    pub fn new<I, S>(
        id: impl Into<CourseId>,
        code: impl Into<String>,
        name: impl Into<String>,
        credits: u32,
        placement: YearTerm,
        prerequisites: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CourseId>,
    {
        let mut prereqs: Vec<CourseId> = Vec::new();
        for p in prerequisites {
            let p = p.into();
            if !prereqs.contains(&p) {
                prereqs.push(p);
            }
        }

        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            credits,
            year: placement.year,
            term: placement.term,
            prerequisites: prereqs,
            status: CourseStatus::Pending,
            last_taken: None,
            attempts: Vec::new(),
        }
    }

    /// Ids of the courses this one requires (may include unresolvable ids).
    pub fn prerequisites(&self) -> &[CourseId] {
        &self.prerequisites
    }

    /// Recommended `(year, term)` placement.
    pub fn placement(&self) -> YearTerm {
        YearTerm::new(self.year, self.term)
    }
}
