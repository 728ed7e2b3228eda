// src/cascade/apply.rs

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::graph::CourseGraph;
use crate::types::{CourseId, CourseStatus};

/// A single status change that was actually written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub course_id: CourseId,
    pub from: CourseStatus,
    pub to: CourseStatus,
}

/// Result of [`apply_change`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedChange {
    /// Transitions in the order they were applied (target course first).
    pub transitions: Vec<StatusTransition>,
    /// Override ids that no longer resolve to a course.
    pub stale: Vec<CourseId>,
    /// Overrides refused because they would move a `Passed` course to
    /// `Active`.
    pub clamped: Vec<CourseId>,
}

impl AppliedChange {
    pub fn changed(&self) -> bool {
        !self.transitions.is_empty()
    }
}

/// Set `course_id` to `new_status` and apply `overrides` in one step.
///
/// Overrides may come from anywhere, so each one is checked on its own:
/// an unknown id is skipped, and a `Passed -> Active` override is refused.
/// Only an explicit status request may make that move. An override for
/// `course_id` itself is ignored in favour of `new_status`.
pub fn apply_change(
    graph: &mut CourseGraph,
    course_id: &str,
    new_status: CourseStatus,
    overrides: &BTreeMap<CourseId, CourseStatus>,
) -> AppliedChange {
    let mut applied = AppliedChange::default();

    match graph.course_mut(course_id) {
        Some(course) => {
            if course.status != new_status {
                applied.transitions.push(StatusTransition {
                    course_id: course.id.clone(),
                    from: course.status,
                    to: new_status,
                });
                course.status = new_status;
            }
        }
        None => {
            warn!(course = %course_id, "status change for unknown course; applying overrides only");
            applied.stale.push(course_id.to_string());
        }
    }

    for (id, &status) in overrides {
        if id == course_id {
            continue;
        }

        let Some(course) = graph.course_mut(id) else {
            warn!(course = %id, "override for unknown course; skipping");
            applied.stale.push(id.clone());
            continue;
        };

        if course.status == CourseStatus::Passed && status == CourseStatus::Active {
            warn!(course = %id, "refusing override that would demote passed to active");
            applied.clamped.push(id.clone());
            continue;
        }

        if course.status == status {
            debug!(course = %id, %status, "override matches current status; no write");
            continue;
        }

        applied.transitions.push(StatusTransition {
            course_id: id.clone(),
            from: course.status,
            to: status,
        });
        course.status = status;
    }

    info!(
        course = %course_id,
        status = %new_status,
        changed = applied.transitions.len(),
        stale = applied.stale.len(),
        clamped = applied.clamped.len(),
        "status change applied"
    );

    applied
}
