#![allow(dead_code)]

use coursedag::graph::{Course, CourseGraph};
use coursedag::ledger::upsert_attempt;
use coursedag::timeline::YearTerm;
use coursedag::types::{CourseStatus, Term};

/// Builder for a `CourseGraph` to simplify test setup.
pub struct CurriculumBuilder {
    courses: Vec<Course>,
}

impl CurriculumBuilder {
    pub fn new() -> Self {
        Self {
            courses: Vec::new(),
        }
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    pub fn build(self) -> CourseGraph {
        CourseGraph::new(self.courses)
    }
}

impl Default for CurriculumBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single `Course`.
pub struct CourseBuilder {
    id: String,
    credits: u32,
    placement: YearTerm,
    prerequisites: Vec<String>,
    status: CourseStatus,
    last_taken: Option<YearTerm>,
    attempts: Vec<(YearTerm, String)>,
}

impl CourseBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            credits: 5,
            placement: YearTerm::FIRST,
            prerequisites: vec![],
            status: CourseStatus::Pending,
            last_taken: None,
            attempts: vec![],
        }
    }

    pub fn after(mut self, prereq: &str) -> Self {
        self.prerequisites.push(prereq.to_string());
        self
    }

    pub fn placed(mut self, year: u32, term: Term) -> Self {
        self.placement = YearTerm::new(year, term);
        self
    }

    pub fn status(mut self, status: CourseStatus) -> Self {
        self.status = status;
        self
    }

    pub fn passed(self) -> Self {
        self.status(CourseStatus::Passed)
    }

    pub fn active(self) -> Self {
        self.status(CourseStatus::Active)
    }

    pub fn last_taken(mut self, year: u32, term: Term) -> Self {
        self.last_taken = Some(YearTerm::new(year, term));
        self
    }

    /// Record an attempt; the grade must be on the scale.
    pub fn attempt(mut self, year: u32, term: Term, grade: &str) -> Self {
        self.attempts.push((YearTerm::new(year, term), grade.to_string()));
        self
    }

    pub fn build(self) -> Course {
        let mut course = Course::new(
            self.id.clone(),
            self.id.clone(),
            format!("Course {}", self.id),
            self.credits,
            self.placement,
            self.prerequisites,
        );
        for (slot, grade) in &self.attempts {
            upsert_attempt(&mut course, *slot, grade, false)
                .unwrap_or_else(|| panic!("invalid test grade {grade:?}"));
        }
        course.status = self.status;
        course.last_taken = self.last_taken;
        course
    }
}
