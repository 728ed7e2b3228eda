// tests/property_cascade.rs
mod common;
use crate::common::builders::{CourseBuilder, CurriculumBuilder};

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;

use coursedag::cascade::{
    apply_change, preview_downgrade_cascade, preview_upgrade_cascade,
};
use coursedag::graph::CourseGraph;
use coursedag::types::CourseStatus;

fn status_strategy() -> impl Strategy<Value = CourseStatus> {
    prop_oneof![
        Just(CourseStatus::Pending),
        Just(CourseStatus::Active),
        Just(CourseStatus::Passed),
    ]
}

// Course N may only require courses 0..N-1, which keeps the graph acyclic.
// With `allow_cycles`, any index is allowed (self-edges included).
fn curriculum_strategy(max_courses: usize, allow_cycles: bool) -> impl Strategy<Value = CourseGraph> {
    (1..=max_courses).prop_flat_map(move |n| {
        (
            proptest::collection::vec(proptest::collection::vec(any::<usize>(), 0..4), n),
            proptest::collection::vec(status_strategy(), n),
        )
            .prop_map(move |(raw_deps, statuses)| {
                let mut builder = CurriculumBuilder::new();
                for (i, (deps, status)) in raw_deps.into_iter().zip(statuses).enumerate() {
                    let mut course = CourseBuilder::new(&format!("c{i}")).status(status);
                    for d in deps {
                        let bound = if allow_cycles { n } else { i };
                        if bound > 0 {
                            course = course.after(&format!("c{}", d % bound));
                        }
                    }
                    builder = builder.with_course(course.build());
                }
                builder.build()
            })
    })
}

fn transitive_dependents(graph: &CourseGraph, root: &str) -> BTreeSet<String> {
    let mut seen = HashSet::new();
    let mut out = BTreeSet::new();
    let mut stack = vec![root.to_string()];
    while let Some(id) = stack.pop() {
        if !seen.insert(id.clone()) {
            continue;
        }
        for dep in graph.dependent_ids(&id) {
            out.insert(dep.clone());
            stack.push(dep.clone());
        }
    }
    out
}

proptest! {
    #[test]
    fn upgrade_then_apply_is_idempotent(
        graph in curriculum_strategy(10, false),
        pick in any::<usize>(),
        target in prop_oneof![Just(CourseStatus::Active), Just(CourseStatus::Passed)],
    ) {
        let mut graph = graph;
        let id = format!("c{}", pick % graph.len());

        let tree = preview_upgrade_cascade(&graph, &id, target);
        apply_change(&mut graph, &id, target, &tree.flatten());

        prop_assert!(preview_upgrade_cascade(&graph, &id, target).is_empty());
    }

    #[test]
    fn downgrade_only_touches_transitive_dependents(
        graph in curriculum_strategy(10, false),
        pick in any::<usize>(),
        new_status in prop_oneof![Just(CourseStatus::Pending), Just(CourseStatus::Active)],
    ) {
        let id = format!("c{}", pick % graph.len());
        let out = preview_downgrade_cascade(&graph, &id, new_status);
        let reachable = transitive_dependents(&graph, &id);

        for (course, status) in &out {
            prop_assert!(reachable.contains(course), "{} is not downstream of {}", course, id);
            prop_assert_eq!(*status, CourseStatus::Pending);
            prop_assert_ne!(graph.status_of(course), Some(CourseStatus::Pending));
        }
    }

    #[test]
    fn previews_terminate_on_cyclic_graphs(
        graph in curriculum_strategy(8, true),
        pick in any::<usize>(),
        target in status_strategy(),
    ) {
        let id = format!("c{}", pick % graph.len());
        let tree = preview_upgrade_cascade(&graph, &id, target);
        let down = preview_downgrade_cascade(&graph, &id, target);

        prop_assert!(tree.flatten().values().all(|s| *s == CourseStatus::Passed));
        prop_assert!(!down.contains_key(&id));
    }
}
