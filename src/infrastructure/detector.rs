//! Fractal source detection
//!
//! Walks a source tree and selects the component files whose first
//! statement is the fractal directive.

use std::fs;
use std::path::Path;

use ignore::WalkBuilder;

use crate::domain::entities::DetectedArtifact;
use crate::domain::ports::SourceClassifier;
use crate::domain::value_objects::Classification;
use crate::error::{FractalError, FractalResult};

/// Directory names never descended into
pub const DEFAULT_EXCLUDED_DIRS: &[&str] =
    &["node_modules", "dist", "build", ".next", "coverage", ".git"];

/// Classifies by the leading directive literal
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveClassifier;

impl SourceClassifier for DirectiveClassifier {
    fn classify(&self, path: &Path) -> Classification {
        match fs::read_to_string(path) {
            Ok(content) => Classification::of_content(&content),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "unreadable source");
                Classification::Ordinary
            }
        }
    }
}

/// Recursive detector over a source tree
pub struct FractalDetector<C: SourceClassifier = DirectiveClassifier> {
    classifier: C,
    extensions: Vec<String>,
    excluded: Vec<String>,
}

impl FractalDetector<DirectiveClassifier> {
    pub fn new() -> Self {
        Self::with_classifier(DirectiveClassifier)
    }
}

impl Default for FractalDetector<DirectiveClassifier> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SourceClassifier> FractalDetector<C> {
    pub fn with_classifier(classifier: C) -> Self {
        Self {
            classifier,
            extensions: vec!["jsx".to_string(), "tsx".to_string()],
            excluded: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Replace the component extensions (without the dot).
    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
        self
    }

    /// Skip these directory names in addition to the defaults.
    pub fn with_excluded(mut self, extra: &[String]) -> Self {
        for dir in extra {
            if !self.excluded.contains(dir) {
                self.excluded.push(dir.clone());
            }
        }
        self
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// True for files a watcher or detector should consider at all.
    pub fn is_candidate_path(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext));
        has_extension && !self.is_excluded(path)
    }

    /// True when any component of `path` is an excluded directory name.
    pub fn is_excluded(&self, path: &Path) -> bool {
        path.components().any(|c| {
            let name = c.as_os_str().to_string_lossy();
            self.excluded.iter().any(|e| *e == name)
        })
    }

    /// Directive-bearing component files under `root`, sorted by path.
    pub fn find_fractals(&self, root: &Path) -> FractalResult<Vec<DetectedArtifact>> {
        if !root.is_dir() {
            return Err(FractalError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let excluded = self.excluded.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                let name = entry.file_name().to_string_lossy();
                !(is_dir && entry.depth() > 0 && excluded.iter().any(|e| *e == name))
            })
            .build();

        let mut found = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            let has_extension = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.extensions.iter().any(|e| e == ext));
            if has_extension && self.classifier.is_fractal(path) {
                found.push(DetectedArtifact::new(path));
            }
        }

        found.sort();
        tracing::debug!(root = %root.display(), count = found.len(), "detected fractals");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn classifier_requires_leading_directive() {
        let dir = tempdir().unwrap();
        let yes = write(dir.path(), "A.tsx", "\n  \"use fractal\";\nexport const A = 1;");
        let no = write(dir.path(), "B.tsx", "import x from 'y';\n\"use fractal\";");
        assert!(DirectiveClassifier.is_fractal(&yes));
        assert!(!DirectiveClassifier.is_fractal(&no));
    }

    #[test]
    fn unreadable_file_is_ordinary() {
        let dir = tempdir().unwrap();
        assert_eq!(
            DirectiveClassifier.classify(&dir.path().join("missing.tsx")),
            Classification::Ordinary
        );
    }

    #[test]
    fn finds_sorted_fractals_and_skips_excluded_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "src/b/Card.tsx", "'use fractal'\nexport const Card = 1;");
        write(root, "src/a/Badge.jsx", "\"use fractal\";\nexport const Badge = 1;");
        write(root, "src/Plain.tsx", "export const Plain = 1;");
        write(root, "src/util.ts", "\"use fractal\";");
        write(root, "node_modules/pkg/X.tsx", "\"use fractal\";");
        write(root, "dist/Y.tsx", "\"use fractal\";");

        let found = FractalDetector::new().find_fractals(root).unwrap();
        let names: Vec<_> = found.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["Badge.jsx", "Card.tsx"]);
    }

    #[test]
    fn extra_excludes_and_extensions() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "stories/S.tsx", "\"use fractal\";");
        write(root, "src/W.vue.js", "\"use fractal\";");
        write(root, "src/K.js", "\"use fractal\";");

        let detector = FractalDetector::new()
            .with_excluded(&["stories".to_string()])
            .with_extensions(&[".js".to_string()]);
        let found = detector.find_fractals(root).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|a| !a.file_path.starts_with(root.join("stories"))));
    }

    #[test]
    fn hidden_and_gitignored_files_are_still_scanned() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join(".gitignore"), "generated/\n").unwrap();
        write(root, "generated/G.tsx", "\"use fractal\";");
        let found = FractalDetector::new().find_fractals(root).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let err = FractalDetector::new()
            .find_fractals(&dir.path().join("nope"))
            .unwrap_err();
        assert!(matches!(err, FractalError::DirectoryNotFound { .. }));
    }

    #[test]
    fn candidate_path_checks_extension_and_exclusion() {
        let detector = FractalDetector::new();
        assert!(detector.is_candidate_path(Path::new("src/A.tsx")));
        assert!(!detector.is_candidate_path(Path::new("src/A.ts")));
        assert!(!detector.is_candidate_path(Path::new("node_modules/A.tsx")));
    }
}
