// src/graph/mod.rs

//! Curriculum graph.
//!
//! - [`course`] defines course nodes and their grade attempts.
//! - [`dependents`] holds the derived reverse-edge index.
//! - [`CourseGraph`] owns every course and answers prerequisite /
//!   dependent lookups, tolerating prerequisite ids that do not resolve.

pub mod course;
pub mod dependents;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::types::{CourseId, CourseStatus};

pub use course::{AttemptId, Course, GradeAttempt};
pub use dependents::DependentIndex;

/// In-memory snapshot of the curriculum, keyed by course id.
///
/// Acyclicity is assumed but not enforced here; every traversal built on
/// top of this type carries its own visited set.
#[derive(Debug, Clone, Default)]
pub struct CourseGraph {
    courses: BTreeMap<CourseId, Course>,
    dependents: DependentIndex,
}

impl CourseGraph {
    /// Build a graph (and its dependent index) from a course set.
    ///
    /// If two courses share an id, the later one replaces the earlier.
    pub fn new(courses: impl IntoIterator<Item = Course>) -> Self {
        let mut map: BTreeMap<CourseId, Course> = BTreeMap::new();
        for course in courses {
            if let Some(prev) = map.insert(course.id.clone(), course) {
                warn!(course = %prev.id, "duplicate course id; keeping the later definition");
            }
        }

        let dependents = DependentIndex::build(&map);
        Self {
            courses: map,
            dependents,
        }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// All courses in id order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Mutable access to a course's progress state.
    ///
    /// Prerequisites stay read-only through this handle, so the dependent
    /// index remains valid.
    pub fn course_mut(&mut self, id: &str) -> Option<&mut Course> {
        self.courses.get_mut(id)
    }

    pub fn status_of(&self, id: &str) -> Option<CourseStatus> {
        self.courses.get(id).map(|c| c.status)
    }

    /// Current status of every course.
    pub fn statuses(&self) -> BTreeMap<CourseId, CourseStatus> {
        self.courses
            .iter()
            .map(|(id, c)| (id.clone(), c.status))
            .collect()
    }

    /// Direct dependents of `id` (courses listing it as a prerequisite).
    pub fn dependents_of(&self, id: &str) -> Vec<&Course> {
        self.dependents
            .get(id)
            .iter()
            .filter_map(|dep| self.courses.get(dep))
            .collect()
    }

    /// Ids of the direct dependents of `id`.
    pub fn dependent_ids(&self, id: &str) -> &[CourseId] {
        self.dependents.get(id)
    }

    /// Resolved prerequisites of `course`; unknown ids are skipped.
    pub fn prerequisites_of(&self, course: &Course) -> Vec<&Course> {
        course
            .prerequisites()
            .iter()
            .filter_map(|id| match self.courses.get(id) {
                Some(prereq) => Some(prereq),
                None => {
                    debug!(
                        course = %course.id,
                        prereq = %id,
                        "unresolvable prerequisite; treating edge as absent"
                    );
                    None
                }
            })
            .collect()
    }

    /// `(course id, missing prerequisite id)` pairs, for diagnostics.
    pub fn unresolved_prerequisites(&self) -> Vec<(CourseId, CourseId)> {
        self.courses
            .values()
            .flat_map(|course| {
                course
                    .prerequisites()
                    .iter()
                    .filter(|p| !self.courses.contains_key(*p))
                    .map(|p| (course.id.clone(), p.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
