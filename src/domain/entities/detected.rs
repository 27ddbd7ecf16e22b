//! Detected artifact entity

use std::path::{Path, PathBuf};

/// A source file selected for the build pipeline
///
/// Produced fresh by every detection pass; carries no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DetectedArtifact {
    pub file_path: PathBuf,
    pub file_name: String,
}

impl DetectedArtifact {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_path,
            file_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_comes_from_path() {
        let artifact = DetectedArtifact::new("src/components/StatsCard.tsx");
        assert_eq!(artifact.file_name, "StatsCard.tsx");
        assert_eq!(artifact.path(), Path::new("src/components/StatsCard.tsx"));
    }

    #[test]
    fn artifacts_order_by_path() {
        let mut v = vec![DetectedArtifact::new("b/B.tsx"), DetectedArtifact::new("a/A.tsx")];
        v.sort();
        assert_eq!(v[0].file_name, "A.tsx");
    }
}
