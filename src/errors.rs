// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Only the loading and CLI layers produce errors. Engine operations
//! report "nothing to do" through empty results instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoursedagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("Cycle detected in prerequisite graph: {0}")]
    PrerequisiteCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CoursedagError>;
