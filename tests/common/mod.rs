#![allow(dead_code)]

pub use coursedag_test_utils::builders;
pub use coursedag_test_utils::init_tracing;

use coursedag::timeline::YearTerm;
use coursedag::types::Term;

/// Shorthand for `YearTerm::new`.
pub fn at(year: u32, term: Term) -> YearTerm {
    YearTerm::new(year, term)
}
