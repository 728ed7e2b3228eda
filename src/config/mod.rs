// src/config/mod.rs

//! Curriculum loading and validation.
//!
//! - `model.rs` is the TOML-backed snapshot of courses and student position.
//! - `loader.rs` reads it from disk or a string.
//! - `validate.rs` checks structural invariants, including acyclicity.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_curriculum_path, load_and_validate, load_from_path, load_from_str};
pub use model::{AttemptConfig, CourseConfig, CurriculumFile, RawCurriculumFile, StudentSection};
