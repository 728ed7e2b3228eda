// src/cascade/downgrade.rs

//! Downgrade cascade: which dependents fall back to `Pending` when a
//! passed course regresses.

use std::collections::{BTreeMap, HashSet, VecDeque};

use tracing::debug;

use crate::graph::CourseGraph;
use crate::types::{CourseId, CourseStatus};

/// Preview the dependents that regress when `course_id` moves from
/// `Passed` to `new_status`.
///
/// Empty unless the course is currently `Passed` and `new_status` is not.
/// A dependent whose prerequisites are no longer all `Passed` (counting
/// every course already regressing in this cascade as unsatisfied) drops
/// to `Pending`; dependents already `Pending` are left alone. Each course
/// is expanded at most once, which keeps diamonds and cycles finite.
pub fn preview_downgrade_cascade(
    graph: &CourseGraph,
    course_id: &str,
    new_status: CourseStatus,
) -> BTreeMap<CourseId, CourseStatus> {
    let mut out = BTreeMap::new();

    let Some(course) = graph.find_by_id(course_id) else {
        debug!(course = %course_id, "downgrade preview for unknown course; nothing to do");
        return out;
    };

    if course.status != CourseStatus::Passed || new_status == CourseStatus::Passed {
        return out;
    }

    let mut affected: HashSet<&str> = HashSet::from([course.id.as_str()]);
    let mut processed: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([course.id.as_str()]);

    while let Some(id) = queue.pop_front() {
        if !processed.insert(id) {
            continue;
        }

        for dependent in graph.dependents_of(id) {
            if affected.contains(dependent.id.as_str()) {
                continue;
            }
            if dependent.status == CourseStatus::Pending {
                continue;
            }

            let still_satisfied = graph.prerequisites_of(dependent).iter().all(|p| {
                !affected.contains(p.id.as_str()) && p.status == CourseStatus::Passed
            });
            if still_satisfied {
                continue;
            }

            debug!(
                course = %dependent.id,
                from = %dependent.status,
                via = %id,
                "prerequisite regressed; scheduling dependent for pending"
            );
            out.insert(dependent.id.clone(), CourseStatus::Pending);
            affected.insert(dependent.id.as_str());
            queue.push_back(dependent.id.as_str());
        }
    }

    out
}
