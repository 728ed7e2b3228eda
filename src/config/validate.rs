// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::config::model::{CurriculumFile, RawCurriculumFile};
use crate::errors::{CoursedagError, Result};
use crate::timeline::YearTerm;

impl TryFrom<RawCurriculumFile> for CurriculumFile {
    type Error = crate::errors::CoursedagError;

    fn try_from(raw: RawCurriculumFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_curriculum(&raw)?;
        Ok(CurriculumFile::new_unchecked(raw.student, raw.course))
    }
}

fn validate_raw_curriculum(cfg: &RawCurriculumFile) -> Result<()> {
    ensure_has_courses(cfg)?;
    validate_student(cfg)?;
    validate_courses(cfg)?;
    warn_unknown_prerequisites(cfg);
    validate_acyclic(cfg)?;
    Ok(())
}

fn ensure_has_courses(cfg: &RawCurriculumFile) -> Result<()> {
    if cfg.course.is_empty() {
        return Err(CoursedagError::ConfigError(
            "curriculum must contain at least one [course.<id>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_student(cfg: &RawCurriculumFile) -> Result<()> {
    check_year("[student].year", cfg.student.year)
}

fn check_year(what: &str, year: u32) -> Result<()> {
    if year == 0 || year > YearTerm::MAX_YEAR {
        return Err(CoursedagError::ConfigError(format!(
            "{what} must be between 1 and {} (got {year})",
            YearTerm::MAX_YEAR
        )));
    }
    Ok(())
}

fn validate_courses(cfg: &RawCurriculumFile) -> Result<()> {
    for (id, course) in cfg.course.iter() {
        check_year(&format!("course '{id}' year"), course.year)?;

        if course.prerequisites.iter().any(|p| p == id) {
            return Err(CoursedagError::ConfigError(format!(
                "course '{id}' cannot list itself in `prerequisites`"
            )));
        }

        if let Some(last) = course.last_taken {
            check_year(&format!("course '{id}' last_taken year"), last.year)?;
        }

        let mut seen = HashSet::new();
        for attempt in course.attempts.iter() {
            let slot = attempt.slot();
            check_year(&format!("course '{id}' attempt year"), slot.year)?;
            if !seen.insert(slot) {
                return Err(CoursedagError::ConfigError(format!(
                    "course '{id}' has more than one attempt at {slot}"
                )));
            }
        }
    }
    Ok(())
}

/// Unknown prerequisite ids are tolerated: the engine treats those edges
/// as absent. They are still worth a warning at load time.
fn warn_unknown_prerequisites(cfg: &RawCurriculumFile) {
    for (id, course) in cfg.course.iter() {
        for prereq in course.prerequisites.iter() {
            if !cfg.course.contains_key(prereq) {
                warn!(
                    course = %id,
                    prereq = %prereq,
                    "unknown prerequisite; edge will be ignored"
                );
            }
        }
    }
}

fn validate_acyclic(cfg: &RawCurriculumFile) -> Result<()> {
    // Edge direction: prerequisite -> course.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for id in cfg.course.keys() {
        graph.add_node(id.as_str());
    }

    for (id, course) in cfg.course.iter() {
        for prereq in course.prerequisites.iter() {
            if cfg.course.contains_key(prereq) {
                graph.add_edge(prereq.as_str(), id.as_str(), ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(CoursedagError::PrerequisiteCycle(format!(
            "cycle detected in prerequisites involving course '{}'",
            cycle.node_id()
        ))),
    }
}
