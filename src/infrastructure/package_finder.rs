//! Filesystem package resolver
//!
//! Walks up from a source file to the nearest usable `package.json`.
//! Lookups are cached per containing directory for the lifetime of the
//! resolver, so one build run reads each descriptor at most once per
//! directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::entities::{PackageDescriptor, PackageInfo};
use crate::domain::ports::PackageResolver;

const DESCRIPTOR: &str = "package.json";

/// Directory -> lookup result, including negative results
#[derive(Debug, Default)]
pub struct PackageCache {
    entries: Mutex<HashMap<PathBuf, Option<PackageInfo>>>,
}

impl PackageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` on miss; `Some(None)` for a cached "not found".
    pub fn get(&self, dir: &Path) -> Option<Option<PackageInfo>> {
        self.entries.lock().ok()?.get(dir).cloned()
    }

    pub fn put(&self, dir: &Path, info: Option<PackageInfo>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(dir.to_path_buf(), info);
        }
    }

    pub fn invalidate(&self, dir: &Path) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(dir);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `PackageResolver` over the local filesystem
#[derive(Debug, Default)]
pub struct FsPackageResolver {
    cache: PackageCache,
}

impl FsPackageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &PackageCache {
        &self.cache
    }

    /// Read the descriptor in `dir`, if it is usable.
    pub fn read_descriptor(dir: &Path) -> Option<(PackageDescriptor, PathBuf)> {
        let path = dir.join(DESCRIPTOR);
        let content = fs::read_to_string(&path).ok()?;
        match PackageDescriptor::parse(&content) {
            Ok(desc) => Some((desc, path)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "invalid package.json");
                None
            }
        }
    }

    fn walk(start: &Path) -> Option<PackageInfo> {
        let mut current = Some(start);
        while let Some(dir) = current {
            // the filesystem root itself is never probed
            let parent = dir.parent()?;
            if let Some((desc, path)) = Self::read_descriptor(dir) {
                if let Some(info) = desc.info(&path) {
                    return Some(info);
                }
            }
            current = Some(parent);
        }
        None
    }
}

impl PackageResolver for FsPackageResolver {
    fn find_closest_package(&self, file: &Path) -> Option<PackageInfo> {
        let absolute = if file.is_absolute() {
            file.to_path_buf()
        } else {
            std::env::current_dir().ok()?.join(file)
        };
        let start = absolute.parent()?.to_path_buf();

        if let Some(cached) = self.cache.get(&start) {
            return cached;
        }
        let found = Self::walk(&start);
        self.cache.put(&start, found.clone());
        found
    }
}
