// src/cascade/upgrade.rs

//! Upgrade cascade: which prerequisites must move up before a course can
//! take a new status.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::graph::{Course, CourseGraph};
use crate::types::{CourseId, CourseStatus};

/// Status every prerequisite must reach for a course to be at `target`.
///
/// Both `Active` and `Passed` require completed prerequisites; `Pending`
/// requires nothing.
pub fn required_prerequisite_status(target: CourseStatus) -> Option<CourseStatus> {
    match target {
        CourseStatus::Passed | CourseStatus::Active => Some(CourseStatus::Passed),
        CourseStatus::Pending => None,
    }
}

/// One prerequisite in an upgrade preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeNode {
    pub course_id: CourseId,
    pub current: CourseStatus,
    /// Status this prerequisite must reach.
    pub required: CourseStatus,
    /// Whether `current` falls short of `required`.
    pub will_change: bool,
    /// Prerequisites of this node that change, or lead to a change.
    pub children: Vec<CascadeNode>,
    /// Already expanded on another path; `children` is left empty here.
    pub repeated: bool,
}

/// Upgrade preview rooted at the course whose status is being changed.
///
/// Only branches that contain at least one change are kept; unchanged
/// nodes on such a branch stay in the tree for context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeTree {
    pub course_id: CourseId,
    pub target: CourseStatus,
    pub nodes: Vec<CascadeNode>,
}

impl CascadeTree {
    fn empty(course_id: &str, target: CourseStatus) -> Self {
        Self {
            course_id: course_id.to_string(),
            target,
            nodes: Vec::new(),
        }
    }

    /// `true` when no prerequisite needs to change.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// New status of every node that actually changes.
    ///
    /// A course reachable along several paths appears once.
    pub fn flatten(&self) -> BTreeMap<CourseId, CourseStatus> {
        let mut out = BTreeMap::new();
        let mut stack: Vec<&CascadeNode> = self.nodes.iter().collect();

        while let Some(node) = stack.pop() {
            if node.will_change {
                out.entry(node.course_id.clone())
                    .and_modify(|s: &mut CourseStatus| *s = (*s).max(node.required))
                    .or_insert(node.required);
            }
            stack.extend(node.children.iter());
        }

        out
    }
}

/// Preview the prerequisite upgrades needed to move `course_id` to `target`.
///
/// Unknown course ids and `Pending` targets yield an empty tree. The walk
/// carries the set of ancestors on the current path, so an accidental
/// cycle ends the branch instead of recursing forever. Each prerequisite
/// is expanded once; later paths reaching it get a `repeated` leaf.
pub fn preview_upgrade_cascade(
    graph: &CourseGraph,
    course_id: &str,
    target: CourseStatus,
) -> CascadeTree {
    let Some(course) = graph.find_by_id(course_id) else {
        debug!(course = %course_id, "upgrade preview for unknown course; nothing to do");
        return CascadeTree::empty(course_id, target);
    };

    let Some(required) = required_prerequisite_status(target) else {
        return CascadeTree::empty(course_id, target);
    };

    let ancestors: HashSet<&str> = HashSet::from([course.id.as_str()]);
    let mut walk = UpgradeWalk {
        graph,
        expanded: HashMap::new(),
    };
    let nodes = walk.build_nodes(course, required, &ancestors);

    debug!(
        course = %course.id,
        %target,
        branches = nodes.len(),
        "upgrade preview computed"
    );

    CascadeTree {
        course_id: course.id.clone(),
        target,
        nodes,
    }
}

/// Per-preview state: which `(prerequisite, required)` pairs were already
/// expanded, and whether that expansion was kept in the tree.
struct UpgradeWalk<'g> {
    graph: &'g CourseGraph,
    expanded: HashMap<(&'g str, CourseStatus), bool>,
}

impl<'g> UpgradeWalk<'g> {
    fn build_nodes(
        &mut self,
        course: &'g Course,
        required: CourseStatus,
        ancestors: &HashSet<&'g str>,
    ) -> Vec<CascadeNode> {
        let mut nodes = Vec::new();

        for prereq in self.graph.prerequisites_of(course) {
            if ancestors.contains(prereq.id.as_str()) {
                warn!(
                    course = %course.id,
                    prereq = %prereq.id,
                    "prerequisite cycle detected; cutting branch"
                );
                continue;
            }

            let will_change = !prereq.status.satisfies(required);

            if let Some(&kept) = self.expanded.get(&(prereq.id.as_str(), required)) {
                if kept {
                    nodes.push(CascadeNode {
                        course_id: prereq.id.clone(),
                        current: prereq.status,
                        required,
                        will_change,
                        children: Vec::new(),
                        repeated: true,
                    });
                }
                continue;
            }

            let mut path = ancestors.clone();
            path.insert(prereq.id.as_str());

            // The prerequisite itself ends up at `required`, so its own
            // prerequisites inherit the rule for that status.
            let children = match required_prerequisite_status(required) {
                Some(next) => self.build_nodes(prereq, next, &path),
                None => Vec::new(),
            };

            let kept = will_change || !children.is_empty();
            self.expanded.insert((prereq.id.as_str(), required), kept);

            if kept {
                nodes.push(CascadeNode {
                    course_id: prereq.id.clone(),
                    current: prereq.status,
                    required,
                    will_change,
                    children,
                    repeated: false,
                });
            }
        }

        nodes
    }
}
