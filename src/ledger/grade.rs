// src/ledger/grade.rs

//! Grade scale.
//!
//! Grades run from 1.0 to 7.0 in steps of 0.1. Everything at or above
//! 4.0 passes; everything below fails. Inputs are normalized by rounding
//! to one decimal place, and anything off the scale is rejected.

use std::fmt;

use serde::Deserialize;

/// A grade on the 1.0 – 7.0 scale, stored in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "GradeRepr")]
pub struct Grade(u8);

impl Grade {
    pub const MIN: Grade = Grade(10);
    pub const MAX: Grade = Grade(70);
    /// Lowest passing grade.
    pub const PASS_THRESHOLD: Grade = Grade(40);
    /// Grade written over an earlier pass that a later pass supersedes.
    pub const SUPERSEDED_FAIL: Grade = Grade(10);

    /// Normalize a grade string.
    ///
    /// Accepts `"5.5"`, `" 5,5 "`, `"5.46"` (→ 5.5) and `"6"` (→ 6.0).
    /// Returns `None` for non-numeric input or values off the scale.
    pub fn parse(input: &str) -> Option<Grade> {
        let normalized = input.trim().replace(',', ".");
        let value: f64 = normalized.parse().ok()?;
        Self::from_f64(value)
    }

    /// Round `value` to one decimal place and map it onto the scale.
    pub fn from_f64(value: f64) -> Option<Grade> {
        if !value.is_finite() {
            return None;
        }
        let tenths = (value * 10.0).round();
        if tenths < f64::from(Self::MIN.0) || tenths > f64::from(Self::MAX.0) {
            return None;
        }
        Some(Grade(tenths as u8))
    }

    pub fn is_passing(self) -> bool {
        self >= Self::PASS_THRESHOLD
    }

    pub fn is_failing(self) -> bool {
        !self.is_passing()
    }

    /// Every acceptable grade, lowest first.
    pub fn all() -> impl Iterator<Item = Grade> {
        (Self::MIN.0..=Self::MAX.0).map(Grade)
    }

    /// Every passing grade, lowest first.
    pub fn passing() -> impl Iterator<Item = Grade> {
        Self::all().filter(|g| g.is_passing())
    }

    /// Every failing grade, lowest first.
    pub fn failing() -> impl Iterator<Item = Grade> {
        Self::all().filter(|g| g.is_failing())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Raw grade as written in a curriculum file: `"5.5"` or `5.5`.
#[derive(Deserialize)]
#[serde(untagged)]
enum GradeRepr {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl TryFrom<GradeRepr> for Grade {
    type Error = String;

    fn try_from(raw: GradeRepr) -> Result<Self, Self::Error> {
        let parsed = match &raw {
            GradeRepr::Text(s) => Grade::parse(s),
            GradeRepr::Integer(i) => Grade::from_f64(*i as f64),
            GradeRepr::Float(f) => Grade::from_f64(*f),
        };
        parsed.ok_or_else(|| {
            let shown = match raw {
                GradeRepr::Text(s) => s,
                GradeRepr::Integer(i) => i.to_string(),
                GradeRepr::Float(f) => f.to_string(),
            };
            format!("invalid grade: {shown} (expected a value between 1.0 and 7.0)")
        })
    }
}
