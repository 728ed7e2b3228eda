// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{CurriculumFile, RawCurriculumFile};
use crate::errors::Result;

/// Read and deserialize a curriculum file without semantic validation.
///
/// Use [`load_and_validate`] unless you need the raw form.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawCurriculumFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let curriculum: RawCurriculumFile = toml::from_str(&contents)?;
    debug!(path = %path.display(), courses = curriculum.course.len(), "curriculum parsed");

    Ok(curriculum)
}

/// Parse a curriculum from an in-memory TOML string and validate it.
pub fn load_from_str(contents: &str) -> Result<CurriculumFile> {
    let raw: RawCurriculumFile = toml::from_str(contents)?;
    CurriculumFile::try_from(raw)
}

/// Load a curriculum file and run validation.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Rejects empty curricula, zero years, duplicate attempt slots,
///   self-prerequisites and prerequisite cycles.
/// - Warns about, but tolerates, prerequisite ids that match no course.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<CurriculumFile> {
    let raw = load_from_path(&path)?;
    let curriculum = CurriculumFile::try_from(raw)?;
    Ok(curriculum)
}

/// Default curriculum location: `Curriculum.toml` in the working directory.
pub fn default_curriculum_path() -> PathBuf {
    PathBuf::from("Curriculum.toml")
}
