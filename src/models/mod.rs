//! Shared data models for validation output and the rule/plan modules.

pub mod plan;
pub mod rules;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Which rule a violation breaks.
pub enum ViolationKind {
    MissingDirectory,
    CountOutOfRange,
    TooLarge,
    Undecodable,
    SizeMismatch,
    RatioMismatch,
    SideOutOfBounds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single non-compliance, scoped to a category and optionally a file.
pub struct Violation {
    pub category: String,
    pub file: Option<String>,
    pub kind: ViolationKind,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "[{}] {} {}", self.category, file, self.message),
            None => write!(f, "[{}] {}", self.category, self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An image file as seen by the validator, before decoding.
pub struct AssetFile {
    pub category: String,
    pub path: PathBuf,
    pub name: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
/// Per-category scan outcome, used for progress lines.
pub struct CategoryReport {
    pub category: String,
    pub dir: String,
    pub present: bool,
    pub files: usize,
    pub violations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub categories: usize,
    pub files: usize,
    pub violations: usize,
}

#[derive(Debug, Clone, Serialize)]
/// Validation results container.
pub struct ValidationReport {
    pub root: String,
    pub categories: Vec<CategoryReport>,
    pub violations: Vec<Violation>,
    pub summary: Summary,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Process exit status: 0 when every category complies, 1 otherwise.
    pub fn exit_status(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}
