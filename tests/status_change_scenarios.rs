// tests/status_change_scenarios.rs
mod common;
use crate::common::builders::{CourseBuilder, CurriculumBuilder};
use crate::common::init_tracing;

use std::collections::BTreeMap;
use std::error::Error;

use coursedag::cascade::{apply_change, apply_plan, plan_status_change};
use coursedag::graph::CourseGraph;
use coursedag::types::CourseStatus::{Active, Passed, Pending};

type TestResult = Result<(), Box<dyn Error>>;

fn chain() -> CourseGraph {
    CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").build())
        .with_course(CourseBuilder::new("B").after("A").build())
        .with_course(CourseBuilder::new("C").after("B").build())
        .build()
}

#[test]
fn passing_c_with_cascade_passes_whole_chain() -> TestResult {
    init_tracing();

    let mut graph = chain();
    let plan = plan_status_change(&graph, "C", Passed).ok_or("C missing")?;
    assert!(!plan.is_empty());
    assert_eq!(plan.from, Pending);

    let applied = apply_plan(&mut graph, &plan, true);
    assert_eq!(applied.transitions.len(), 3);
    assert_eq!(applied.transitions[0].course_id, "C");

    for id in ["A", "B", "C"] {
        assert_eq!(graph.status_of(id), Some(Passed), "{id} should be passed");
    }
    Ok(())
}

#[test]
fn passing_c_without_cascade_only_touches_c() -> TestResult {
    let mut graph = chain();
    let plan = plan_status_change(&graph, "C", Passed).ok_or("C missing")?;

    apply_plan(&mut graph, &plan, false);

    assert_eq!(graph.status_of("A"), Some(Pending));
    assert_eq!(graph.status_of("B"), Some(Pending));
    assert_eq!(graph.status_of("C"), Some(Passed));
    Ok(())
}

#[test]
fn satisfied_change_has_empty_plan() -> TestResult {
    let graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").passed().build())
        .with_course(CourseBuilder::new("B").after("A").build())
        .build();

    let plan = plan_status_change(&graph, "B", Active).ok_or("B missing")?;
    assert!(plan.is_empty());
    assert!(plan.overrides().is_empty());
    Ok(())
}

#[test]
fn passed_to_active_combines_upgrade_and_downgrade() -> TestResult {
    // B was passed without its prerequisite; C built on B.
    let mut graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").build())
        .with_course(CourseBuilder::new("B").after("A").passed().build())
        .with_course(CourseBuilder::new("C").after("B").passed().build())
        .build();

    let plan = plan_status_change(&graph, "B", Active).ok_or("B missing")?;
    assert_eq!(
        plan.overrides(),
        BTreeMap::from([("A".to_string(), Passed), ("C".to_string(), Pending)])
    );

    apply_plan(&mut graph, &plan, true);
    assert_eq!(graph.status_of("A"), Some(Passed));
    assert_eq!(graph.status_of("B"), Some(Active));
    assert_eq!(graph.status_of("C"), Some(Pending));
    Ok(())
}

#[test]
fn unknown_course_has_no_plan() {
    assert!(plan_status_change(&chain(), "Z", Passed).is_none());
}

#[test]
fn overrides_never_demote_passed_to_active() {
    init_tracing();

    let mut graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").passed().build())
        .with_course(CourseBuilder::new("B").build())
        .build();

    let overrides = BTreeMap::from([("A".to_string(), Active)]);
    let applied = apply_change(&mut graph, "B", Active, &overrides);

    assert_eq!(graph.status_of("A"), Some(Passed));
    assert_eq!(graph.status_of("B"), Some(Active));
    assert_eq!(applied.clamped, vec!["A".to_string()]);
}

#[test]
fn explicit_request_may_move_passed_to_active() {
    let mut graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").passed().build())
        .build();

    apply_change(&mut graph, "A", Active, &BTreeMap::new());
    assert_eq!(graph.status_of("A"), Some(Active));
}

#[test]
fn stale_override_ids_are_skipped_individually() {
    let mut graph = chain();
    let overrides = BTreeMap::from([
        ("A".to_string(), Passed),
        ("GONE".to_string(), Passed),
        ("B".to_string(), Passed),
    ]);

    let applied = apply_change(&mut graph, "C", Passed, &overrides);

    assert_eq!(applied.stale, vec!["GONE".to_string()]);
    assert_eq!(graph.status_of("A"), Some(Passed));
    assert_eq!(graph.status_of("B"), Some(Passed));
    assert_eq!(graph.status_of("C"), Some(Passed));
}

#[test]
fn override_for_target_course_is_ignored() {
    let mut graph = chain();
    let overrides = BTreeMap::from([("C".to_string(), Pending)]);

    apply_change(&mut graph, "C", Active, &overrides);
    assert_eq!(graph.status_of("C"), Some(Active));
}

#[test]
fn unchanged_statuses_produce_no_transitions() {
    let mut graph = CurriculumBuilder::new()
        .with_course(CourseBuilder::new("A").passed().build())
        .build();

    let applied = apply_change(
        &mut graph,
        "A",
        Passed,
        &BTreeMap::from([("A".to_string(), Passed)]),
    );
    assert!(!applied.changed());
}
