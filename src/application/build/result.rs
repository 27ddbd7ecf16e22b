//! Build Result

use std::path::PathBuf;

use crate::domain::value_objects::ArtifactIdentity;

/// A candidate that produced an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltFractal {
    pub source: PathBuf,
    pub identity: ArtifactIdentity,
    pub output: PathBuf,
    pub manifest: PathBuf,
    pub metadata: PathBuf,
    /// Bundled size in bytes
    pub size: u64,
}

/// A candidate with no owning package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFractal {
    pub source: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFractal {
    pub source: PathBuf,
    pub error: String,
}

/// Outcome of the single-file pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Built(BuiltFractal),
    Skipped(SkippedFractal),
    Failed(FailedFractal),
}

/// Result of a build run, in detection order
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub built: Vec<BuiltFractal>,
    pub skipped: Vec<SkippedFractal>,
    pub failed: Vec<FailedFractal>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: BuildOutcome) {
        match outcome {
            BuildOutcome::Built(b) => self.built.push(b),
            BuildOutcome::Skipped(s) => self.skipped.push(s),
            BuildOutcome::Failed(f) => self.failed.push(f),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of candidates considered
    pub fn total(&self) -> usize {
        self.built.len() + self.skipped.len() + self.failed.len()
    }
}
