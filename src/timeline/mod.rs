// src/timeline/mod.rs

//! Year-term timeline.
//!
//! - [`YearTerm`] is a point on the academic calendar with a total order
//!   derived from its ordinal.
//! - [`window`] computes the slots in which a course may legally receive a
//!   grade attempt, given its prerequisites' completion points.

pub mod window;

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;

use crate::types::Term;

pub use window::{completion_point, compute_attempt_window};

/// A `(year, term)` position. Years start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct YearTerm {
    pub year: u32,
    pub term: Term,
}

impl YearTerm {
    /// The first slot of any curriculum, `(1, Term1)`.
    pub const FIRST: YearTerm = YearTerm {
        year: 1,
        term: Term::Term1,
    };

    /// Highest year a curriculum file or the CLI may name.
    pub const MAX_YEAR: u32 = 100;

    pub fn new(year: u32, term: Term) -> Self {
        Self { year, term }
    }

    /// Single integer encoding of this slot: `year * 3 + term index`.
    ///
    /// Widened to `u64` so every `u32` year has an ordinal.
    pub fn ordinal(self) -> u64 {
        u64::from(self.year) * u64::from(Term::PER_YEAR) + u64::from(self.term.index())
    }

    /// The slot one term later, or `None` past the last representable year.
    pub fn checked_next(self) -> Option<YearTerm> {
        match self.term.succ() {
            Some(term) => Some(YearTerm::new(self.year, term)),
            None => self
                .year
                .checked_add(1)
                .map(|year| YearTerm::new(year, Term::Term1)),
        }
    }

    /// The slot one term later, rolling into the next year after `Term3`.
    ///
    /// Saturates at the last term of `u32::MAX`.
    pub fn next(self) -> YearTerm {
        self.checked_next().unwrap_or(self)
    }

    /// Every slot from `start` to `end` inclusive, in chronological order.
    ///
    /// Empty when `end` is before `start`.
    pub fn range_inclusive(start: YearTerm, end: YearTerm) -> Vec<YearTerm> {
        let mut slots = Vec::new();
        let mut cursor = Some(start);
        while let Some(slot) = cursor.filter(|slot| *slot <= end) {
            slots.push(slot);
            cursor = slot.checked_next();
        }
        slots
    }
}

/// Sign of `a` relative to `b` on the timeline.
pub fn compare(a: YearTerm, b: YearTerm) -> Ordering {
    a.ordinal().cmp(&b.ordinal())
}

impl Ord for YearTerm {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(*self, *other)
    }
}

impl PartialOrd for YearTerm {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for YearTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y{}/{}", self.year, self.term)
    }
}
