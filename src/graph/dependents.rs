// src/graph/dependents.rs

use std::collections::{BTreeMap, HashMap};

use crate::graph::course::Course;
use crate::types::CourseId;

/// Reverse prerequisite edges: course id -> ids of courses that require it.
///
/// Derived from the course set and rebuilt wholesale whenever that set
/// changes; never patched in place. Unresolvable prerequisite ids get no
/// entry, so they never show up as a dependent source.
#[derive(Debug, Clone, Default)]
pub struct DependentIndex {
    dependents: HashMap<CourseId, Vec<CourseId>>,
}

impl DependentIndex {
    pub fn build(courses: &BTreeMap<CourseId, Course>) -> Self {
        let mut dependents: HashMap<CourseId, Vec<CourseId>> = HashMap::new();

        // BTreeMap iteration keeps each dependent list in id order.
        for course in courses.values() {
            for prereq in course.prerequisites() {
                if courses.contains_key(prereq) {
                    dependents
                        .entry(prereq.clone())
                        .or_default()
                        .push(course.id.clone());
                }
            }
        }

        Self { dependents }
    }

    /// Ids of the direct dependents of `id` (empty for unknown ids).
    pub fn get(&self, id: &str) -> &[CourseId] {
        self.dependents
            .get(id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
