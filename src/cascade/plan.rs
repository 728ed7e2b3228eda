// src/cascade/plan.rs

//! Preview-then-confirm flow for a single status change.

use std::collections::BTreeMap;

use crate::cascade::apply::{apply_change, AppliedChange};
use crate::cascade::downgrade::preview_downgrade_cascade;
use crate::cascade::upgrade::{preview_upgrade_cascade, CascadeTree};
use crate::graph::CourseGraph;
use crate::types::{CourseId, CourseStatus};

/// Both cascade previews for one requested status change.
///
/// Computed against a snapshot; apply it before the graph changes again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChangePlan {
    pub course_id: CourseId,
    pub from: CourseStatus,
    pub to: CourseStatus,
    /// Prerequisites that must move up.
    pub upgrade: CascadeTree,
    /// Dependents that fall back to `Pending`.
    pub downgrade: BTreeMap<CourseId, CourseStatus>,
}

impl StatusChangePlan {
    /// `true` when the change can be applied without asking for a
    /// cascade confirmation.
    pub fn is_empty(&self) -> bool {
        self.upgrade.is_empty() && self.downgrade.is_empty()
    }

    /// Combined override set (upgrades, then downgrades on top).
    pub fn overrides(&self) -> BTreeMap<CourseId, CourseStatus> {
        let mut out = self.upgrade.flatten();
        out.extend(self.downgrade.iter().map(|(k, v)| (k.clone(), *v)));
        out
    }
}

/// Build the plan for moving `course_id` to `to`. `None` for unknown ids.
pub fn plan_status_change(
    graph: &CourseGraph,
    course_id: &str,
    to: CourseStatus,
) -> Option<StatusChangePlan> {
    let course = graph.find_by_id(course_id)?;

    Some(StatusChangePlan {
        course_id: course.id.clone(),
        from: course.status,
        to,
        upgrade: preview_upgrade_cascade(graph, course_id, to),
        downgrade: preview_downgrade_cascade(graph, course_id, to),
    })
}

/// Apply a plan. With `cascade == false` only the course itself changes.
pub fn apply_plan(graph: &mut CourseGraph, plan: &StatusChangePlan, cascade: bool) -> AppliedChange {
    let overrides = if cascade {
        plan.overrides()
    } else {
        BTreeMap::new()
    };
    apply_change(graph, &plan.course_id, plan.to, &overrides)
}
