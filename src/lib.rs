// src/lib.rs

pub mod cascade;
pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod ledger;
pub mod logging;
pub mod timeline;
pub mod types;

use anyhow::Result;
use tracing::{debug, info};

use crate::cascade::{apply_plan, plan_status_change, CascadeNode, CascadeTree};
use crate::cli::{CliArgs, Command};
use crate::config::loader::load_and_validate;
use crate::errors::CoursedagError;
use crate::graph::{Course, CourseGraph};
use crate::ledger::{commit_attempt, grade_choices, plan_attempt, Grade, GradeChoices};
use crate::timeline::{completion_point, compute_attempt_window, YearTerm};
use crate::types::CourseStatus;

/// High-level entry point used by `main.rs`.
///
/// Loads the curriculum snapshot, then runs one command against the
/// in-memory graph and prints the outcome. Nothing is written back to
/// disk; persisting the result is left to the caller.
pub fn run(args: CliArgs) -> Result<()> {
    let curriculum = load_and_validate(&args.curriculum)?;
    let mut graph = curriculum.to_graph();
    let position = curriculum.position();

    info!(
        courses = graph.len(),
        %position,
        "curriculum loaded"
    );

    match args.command {
        Command::Check => {
            print_check(&graph, position);
        }
        Command::Window { course, year, term } => {
            let current = YearTerm::new(
                year.unwrap_or(position.year),
                term.unwrap_or(position.term),
            );
            let course = find_course(&graph, &course)?;
            print_window(&graph, course, current);
        }
        Command::Status {
            course,
            status,
            no_cascade,
        } => {
            run_status(&mut graph, &course, status, !no_cascade)?;
        }
        Command::Grade {
            course,
            year,
            term,
            grade,
            no_last_taken,
        } => {
            run_grade(
                &mut graph,
                &course,
                YearTerm::new(year, term),
                &grade,
                !no_last_taken,
                position,
            )?;
        }
    }

    Ok(())
}

fn find_course<'g>(graph: &'g CourseGraph, id: &str) -> std::result::Result<&'g Course, CoursedagError> {
    graph
        .find_by_id(id)
        .ok_or_else(|| CoursedagError::CourseNotFound(id.to_string()))
}

fn print_check(graph: &CourseGraph, position: YearTerm) {
    println!("coursedag check");
    println!("  student position = {position}");
    println!();

    println!("courses ({}):", graph.len());
    for course in graph.courses() {
        println!(
            "  - {} [{}] {} ({} credits, {})",
            course.id,
            course.code,
            course.name,
            course.credits,
            course.placement()
        );
        println!("      status: {}", course.status);
        if !course.prerequisites().is_empty() {
            println!("      prerequisites: {:?}", course.prerequisites());
        }
        let dependents = graph.dependent_ids(&course.id);
        if !dependents.is_empty() {
            println!("      dependents: {:?}", dependents);
        }
        if let Some(last) = course.last_taken {
            println!("      last_taken: {last}");
        }
        for attempt in &course.attempts {
            println!("      attempt {}: {}", attempt.slot, attempt.grade);
        }
    }

    let unresolved = graph.unresolved_prerequisites();
    if !unresolved.is_empty() {
        println!();
        println!("unresolved prerequisites ({}):", unresolved.len());
        for (course, missing) in unresolved {
            println!("  - {course} -> {missing}");
        }
    }

    debug!("check complete (no changes)");
}

fn print_window(graph: &CourseGraph, course: &Course, current: YearTerm) {
    println!("attempt window for {} at {current}", course.id);

    for prereq in graph.prerequisites_of(course) {
        match completion_point(prereq) {
            Some(point) => println!("  prerequisite {} completed at {point}", prereq.id),
            None => println!("  prerequisite {} not completed", prereq.id),
        }
    }

    let window = compute_attempt_window(course, current, graph);
    if window.is_empty() {
        println!("  window: (empty)");
    } else {
        let slots: Vec<String> = window.iter().map(|s| s.to_string()).collect();
        println!("  window: {}", slots.join(", "));
    }
}

fn run_status(
    graph: &mut CourseGraph,
    course_id: &str,
    status: CourseStatus,
    cascade: bool,
) -> Result<()> {
    let plan = plan_status_change(graph, course_id, status)
        .ok_or_else(|| CoursedagError::CourseNotFound(course_id.to_string()))?;

    println!("status change {}: {} -> {}", plan.course_id, plan.from, plan.to);

    if plan.is_empty() {
        println!("  no cascade needed");
    } else {
        print_upgrade_tree(&plan.upgrade);
        for (id, to) in &plan.downgrade {
            println!("  dependent {id} -> {to}");
        }
        if !cascade {
            println!("  cascade skipped (--no-cascade)");
        }
    }

    let applied = apply_plan(graph, &plan, cascade);
    println!();
    println!("applied ({} changes):", applied.transitions.len());
    for t in &applied.transitions {
        println!("  - {}: {} -> {}", t.course_id, t.from, t.to);
    }
    for id in &applied.clamped {
        println!("  - {id}: override refused (passed -> active)");
    }

    Ok(())
}

fn print_upgrade_tree(tree: &CascadeTree) {
    if tree.is_empty() {
        return;
    }
    println!("  prerequisites to upgrade:");
    for node in &tree.nodes {
        print_cascade_node(node, 2);
    }
}

fn print_cascade_node(node: &CascadeNode, depth: usize) {
    let marker = if node.will_change {
        format!("{} -> {}", node.current, node.required)
    } else {
        format!("{} (unchanged)", node.current)
    };
    let seen = if node.repeated { " (see above)" } else { "" };
    println!("{}{}: {marker}{seen}", "  ".repeat(depth), node.course_id);
    for child in &node.children {
        print_cascade_node(child, depth + 1);
    }
}

fn run_grade(
    graph: &mut CourseGraph,
    course_id: &str,
    slot: YearTerm,
    grade: &str,
    update_last_taken: bool,
    position: YearTerm,
) -> Result<()> {
    let grade = Grade::parse(grade)
        .ok_or_else(|| anyhow::anyhow!("invalid grade: {grade} (expected 1.0 to 7.0)"))?;

    let course = find_course(graph, course_id)?;

    // Window legality and grade filtering are caller duties; the ledger
    // itself accepts any write.
    let window = compute_attempt_window(course, position, graph);
    if !window.contains(&slot) {
        anyhow::bail!(
            "{slot} is outside the attempt window of {} at {position}",
            course.id
        );
    }

    let choices = grade_choices(course, slot);
    if !choices.allows(grade) {
        if let GradeChoices::FailingOnly { cutoff } = choices {
            anyhow::bail!(
                "{slot} precedes the pass recorded at {cutoff}; only failing grades may be recorded there"
            );
        }
    }

    let plan = plan_attempt(course, slot, grade);
    println!("grade {} at {}: {}", course.id, slot, grade);
    if plan.replaces_existing {
        println!("  replaces existing attempt");
    }
    for s in &plan.superseded {
        println!("  supersedes pass at {s} (rewritten to {})", Grade::SUPERSEDED_FAIL);
    }
    for s in &plan.removed {
        println!("  removes later attempt at {s}");
    }

    let course = graph
        .course_mut(course_id)
        .ok_or_else(|| CoursedagError::CourseNotFound(course_id.to_string()))?;
    commit_attempt(course, &plan, update_last_taken);

    println!();
    println!("ledger for {}:", course.id);
    for attempt in &course.attempts {
        match attempt.superseded_from {
            Some(original) => println!("  {}: {} (superseded {original})", attempt.slot, attempt.grade),
            None => println!("  {}: {}", attempt.slot, attempt.grade),
        }
    }
    if let Some(last) = course.last_taken {
        println!("  last_taken: {last}");
    }

    Ok(())
}
