// tests/cascade_upgrade.rs
mod common;
use crate::common::builders::{CourseBuilder, CurriculumBuilder};
use crate::common::init_tracing;

use std::collections::BTreeMap;

use coursedag::cascade::{
    apply_change, preview_upgrade_cascade, required_prerequisite_status, CascadeNode,
    CascadeTree,
};
use coursedag::graph::CourseGraph;
use coursedag::types::CourseStatus::{self, Active, Passed, Pending};

fn chain() -> CourseGraph {
    CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").build())
        .with_course(CourseBuilder::new("B").after("A").build())
        .with_course(CourseBuilder::new("C").after("B").build())
        .build()
}

fn ids(tree: &CascadeTree) -> Vec<String> {
    tree.flatten().into_keys().collect()
}

#[test]
fn required_status_mapping() {
    assert_eq!(required_prerequisite_status(Passed), Some(Passed));
    assert_eq!(required_prerequisite_status(Active), Some(Passed));
    assert_eq!(required_prerequisite_status(Pending), None);
}

#[test]
fn passing_leaf_of_chain_upgrades_every_ancestor() {
    init_tracing();

    let graph = chain();
    let tree = preview_upgrade_cascade(&graph, "C", Passed);

    assert_eq!(tree.course_id, "C");
    assert_eq!(tree.nodes.len(), 1);
    let b = &tree.nodes[0];
    assert_eq!(b.course_id, "B");
    assert!(b.will_change);
    assert_eq!(b.children.len(), 1);
    assert_eq!(b.children[0].course_id, "A");

    let flat = tree.flatten();
    assert_eq!(
        flat,
        BTreeMap::from([("A".to_string(), Passed), ("B".to_string(), Passed)])
    );
}

#[test]
fn active_target_also_requires_passed_prerequisites() {
    let graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").active().build())
        .with_course(CourseBuilder::new("B").after("A").build())
        .build();

    let tree = preview_upgrade_cascade(&graph, "B", Active);
    assert_eq!(tree.flatten(), BTreeMap::from([("A".to_string(), Passed)]));
    assert_eq!(tree.nodes[0].current, Active);
}

#[test]
fn pending_target_never_cascades() {
    let graph = chain();
    assert!(preview_upgrade_cascade(&graph, "C", Pending).is_empty());
}

#[test]
fn unchanged_node_is_kept_when_a_descendant_changes() {
    let graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").build())
        .with_course(CourseBuilder::new("B").after("A").passed().build())
        .with_course(CourseBuilder::new("C").after("B").build())
        .build();

    let tree = preview_upgrade_cascade(&graph, "C", Passed);
    let b = &tree.nodes[0];
    assert_eq!(b.course_id, "B");
    assert!(!b.will_change);
    assert_eq!(b.children[0].course_id, "A");
    assert!(b.children[0].will_change);

    assert_eq!(ids(&tree), vec!["A".to_string()]);
}

#[test]
fn satisfied_branches_are_pruned() {
    let graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").passed().build())
        .with_course(CourseBuilder::new("X").build())
        .with_course(CourseBuilder::new("C").after("A").after("X").build())
        .build();

    let tree = preview_upgrade_cascade(&graph, "C", Passed);
    assert_eq!(tree.nodes.len(), 1);
    assert_eq!(tree.nodes[0].course_id, "X");
}

#[test]
fn shared_prerequisite_appears_once_when_flattened() {
    // D needs B and C; both need A.
    let graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").build())
        .with_course(CourseBuilder::new("B").after("A").build())
        .with_course(CourseBuilder::new("C").after("A").build())
        .with_course(CourseBuilder::new("D").after("B").after("C").build())
        .build();

    let tree = preview_upgrade_cascade(&graph, "D", Passed);
    assert_eq!(tree.nodes.len(), 2);
    assert_eq!(
        ids(&tree),
        vec!["A".to_string(), "B".to_string(), "C".to_string()]
    );
}

fn count_nodes(nodes: &[CascadeNode]) -> usize {
    nodes.iter().map(|n| 1 + count_nodes(&n.children)).sum()
}

#[test]
fn shared_prerequisite_is_expanded_once() {
    let graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").build())
        .with_course(CourseBuilder::new("B").after("A").build())
        .with_course(CourseBuilder::new("C").after("A").build())
        .with_course(CourseBuilder::new("D").after("B").after("C").build())
        .build();

    let tree = preview_upgrade_cascade(&graph, "D", Passed);
    let b = &tree.nodes[0];
    let c = &tree.nodes[1];
    assert_eq!(b.children[0].course_id, "A");
    assert!(!b.children[0].repeated);
    assert_eq!(c.children[0].course_id, "A");
    assert!(c.children[0].repeated);
    assert!(c.children[0].will_change);
    assert!(c.children[0].children.is_empty());
}

#[test]
fn layered_prerequisites_stay_linear() {
    init_tracing();

    // 20 layers of two courses, each needing both courses of the layer below.
    let layers = 20;
    let mut builder = CurriculumBuilder::new();
    for layer in 0..layers {
        for side in ["L", "R"] {
            let mut course = CourseBuilder::new(&format!("{side}{layer}"));
            if layer > 0 {
                course = course
                    .after(&format!("L{}", layer - 1))
                    .after(&format!("R{}", layer - 1));
            }
            builder = builder.with_course(course.build());
        }
    }
    let top = CourseBuilder::new("TOP")
        .after(&format!("L{}", layers - 1))
        .after(&format!("R{}", layers - 1));
    let graph = builder.with_course(top.build()).build();

    let tree = preview_upgrade_cascade(&graph, "TOP", Passed);

    // At most one node per prerequisite edge.
    let edges = 2 + 4 * (layers - 1);
    assert!(count_nodes(&tree.nodes) <= edges);
    assert_eq!(tree.flatten().len(), 2 * layers);
}

#[test]
fn upgrade_is_idempotent_after_apply() {
    init_tracing();

    let mut graph = chain();
    let tree = preview_upgrade_cascade(&graph, "C", Passed);
    apply_change(&mut graph, "C", Passed, &tree.flatten());

    assert!(preview_upgrade_cascade(&graph, "C", Passed).is_empty());
}

#[test]
fn unknown_course_and_unknown_prerequisites_give_empty_preview() {
    let graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("B").after("GHOST").build())
        .build();

    assert!(preview_upgrade_cascade(&graph, "NOPE", Passed).is_empty());
    assert!(preview_upgrade_cascade(&graph, "B", Passed).is_empty());
}

#[test]
fn cyclic_prerequisites_terminate() {
    init_tracing();

    let graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").after("C").build())
        .with_course(CourseBuilder::new("B").after("A").build())
        .with_course(CourseBuilder::new("C").after("B").build())
        .build();

    let tree = preview_upgrade_cascade(&graph, "C", Passed);
    assert_eq!(ids(&tree), vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn preview_does_not_mutate_graph() {
    let graph = chain();
    let before = graph.statuses();
    let _ = preview_upgrade_cascade(&graph, "C", Passed);
    assert_eq!(graph.statuses(), before);
    assert!(graph.statuses().values().all(|s| *s == CourseStatus::Pending));
}
