//! Content tracking for change detection

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;

/// Last seen content hash per file
///
/// Editors often rewrite files without changing them; only real content
/// changes trigger a rebuild.
#[derive(Debug, Default)]
pub struct ContentTracker {
    hashes: HashMap<PathBuf, ContentHash>,
}

impl ContentTracker {
    /// Create a new empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// True when `hash` differs from the recorded one, or nothing is recorded
    pub fn is_changed(&self, path: &Path, hash: &ContentHash) -> bool {
        match self.hashes.get(path) {
            Some(known) => known != hash,
            None => true,
        }
    }

    pub fn update(&mut self, path: &Path, hash: ContentHash) {
        self.hashes.insert(path.to_path_buf(), hash);
    }

    /// Record `hash` and report whether it was a change
    pub fn observe(&mut self, path: &Path, hash: ContentHash) -> bool {
        let changed = self.is_changed(path, &hash);
        if changed {
            self.update(path, hash);
        }
        changed
    }

    pub fn invalidate(&mut self, path: &Path) {
        self.hashes.remove(path);
    }

    /// Record the current content of every readable file in `paths`
    pub fn seed<'a>(&mut self, paths: impl IntoIterator<Item = &'a Path>) {
        for path in paths {
            if let Some(hash) = ContentHash::of_file(path) {
                self.update(path, hash);
            }
        }
    }
}
