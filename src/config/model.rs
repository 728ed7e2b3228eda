// src/config/model.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::graph::{Course, CourseGraph, GradeAttempt};
use crate::ledger::Grade;
use crate::timeline::YearTerm;
use crate::types::{CourseId, CourseStatus, Term};

/// Curriculum snapshot exactly as read from TOML, before validation.
///
/// ```toml
/// [student]
/// year = 2
/// term = "term1"
///
/// [course.MAT101]
/// name = "Calculus I"
/// credits = 10
/// year = 1
/// term = "term1"
/// status = "passed"
/// last_taken = { year = 1, term = "term1" }
///
/// [[course.MAT101.attempts]]
/// year = 1
/// term = "term1"
/// grade = "5.5"
///
/// [course.MAT102]
/// name = "Calculus II"
/// prerequisites = ["MAT101"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurriculumFile {
    /// Student's current position from `[student]`.
    #[serde(default)]
    pub student: StudentSection,

    /// All courses from `[course.<id>]`; keys are the course ids.
    #[serde(default)]
    pub course: BTreeMap<CourseId, CourseConfig>,
}

/// Validated curriculum snapshot.
///
/// Only constructible through `TryFrom<RawCurriculumFile>`, so holding
/// one means the checks in `config::validate` passed.
#[derive(Debug, Clone)]
pub struct CurriculumFile {
    pub student: StudentSection,
    pub course: BTreeMap<CourseId, CourseConfig>,
}

impl CurriculumFile {
    pub(crate) fn new_unchecked(
        student: StudentSection,
        course: BTreeMap<CourseId, CourseConfig>,
    ) -> Self {
        Self { student, course }
    }

    /// The student's declared current position.
    pub fn position(&self) -> YearTerm {
        YearTerm::new(self.student.year, self.student.term)
    }

    /// Build the in-memory course graph from this snapshot.
    pub fn to_graph(&self) -> CourseGraph {
        CourseGraph::new(
            self.course
                .iter()
                .map(|(id, cfg)| cfg.to_course(id)),
        )
    }
}

/// `[student]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentSection {
    #[serde(default = "default_year")]
    pub year: u32,

    #[serde(default = "default_term")]
    pub term: Term,
}

fn default_year() -> u32 {
    1
}

fn default_term() -> Term {
    Term::Term1
}

impl Default for StudentSection {
    fn default() -> Self {
        Self {
            year: default_year(),
            term: default_term(),
        }
    }
}

/// `[course.<id>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseConfig {
    /// Display code; defaults to the course id.
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub credits: u32,

    /// Recommended placement year (>= 1).
    #[serde(default = "default_year")]
    pub year: u32,

    #[serde(default = "default_term")]
    pub term: Term,

    /// Ids of required courses. Ids that match no course are tolerated.
    #[serde(default)]
    pub prerequisites: Vec<CourseId>,

    #[serde(default)]
    pub status: CourseStatus,

    #[serde(default)]
    pub last_taken: Option<YearTerm>,

    #[serde(default)]
    pub attempts: Vec<AttemptConfig>,
}

impl CourseConfig {
    pub fn to_course(&self, id: &str) -> Course {
        let mut course = Course::new(
            id,
            self.code.clone().unwrap_or_else(|| id.to_string()),
            self.name.clone(),
            self.credits,
            YearTerm::new(self.year, self.term),
            self.prerequisites.iter().cloned(),
        );
        course.status = self.status;
        course.last_taken = self.last_taken;
        course.attempts = self.attempts.iter().map(AttemptConfig::to_attempt).collect();
        course.attempts.sort_by_key(|a| a.slot);
        course
    }
}

/// `[[course.<id>.attempts]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptConfig {
    /// Stable attempt id; a fresh UUID is assigned when absent.
    #[serde(default)]
    pub id: Option<String>,

    pub year: u32,
    pub term: Term,
    pub grade: Grade,

    /// RFC 3339 timestamp, written as a quoted string.
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl AttemptConfig {
    pub fn slot(&self) -> YearTerm {
        YearTerm::new(self.year, self.term)
    }

    fn to_attempt(&self) -> GradeAttempt {
        GradeAttempt {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            slot: self.slot(),
            grade: self.grade,
            recorded_at: self.recorded_at.unwrap_or_else(Utc::now),
            superseded_from: None,
        }
    }
}
