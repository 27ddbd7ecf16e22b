//! Registry storage
//!
//! One JSON document per fractal under the storage directory, named by the
//! percent-encoded id. Records are replaced wholesale; the in-memory map is
//! a view over the directory and is rebuilt lazily after a restart.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use thiserror::Error;

use crate::domain::entities::StoredFractal;
use crate::domain::services::{CompileError, FractalCompiler};
use crate::domain::value_objects::{percent_decode, FractalId};

const RECORD_EXTENSION: &str = "json";
const TEMP_PREFIX: &str = ".tmp-";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("storage error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub struct RegistryStore {
    root: PathBuf,
    compiler: FractalCompiler,
    cache: Mutex<HashMap<FractalId, StoredFractal>>,
}

impl RegistryStore {
    /// Open (and create) the storage directory.
    pub fn open(root: impl Into<PathBuf>, compiler: FractalCompiler) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self {
            root,
            compiler,
            cache: Mutex::new(HashMap::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self, id: &FractalId) -> PathBuf {
        self.root.join(id.storage_file_name())
    }

    /// Compile `source` and store it under `id`, replacing any previous record.
    pub fn add_fractal(
        &self,
        id: &FractalId,
        source: &str,
        manifest: Option<serde_json::Value>,
    ) -> Result<StoredFractal, StoreError> {
        let compiled = self.compiler.compile(source, id.as_str())?;

        let record = StoredFractal {
            id: id.to_string(),
            source: source.to_string(),
            compiled_code: compiled.code,
            styles: compiled.styles,
            manifest,
            created_at: Utc::now(),
        };

        self.persist(id, &record)?;
        self.cache_put(id, record.clone());
        tracing::info!(%id, "stored fractal");
        Ok(record)
    }

    /// Cached record, else the on-disk one. Unreadable records count as absent.
    pub fn get_fractal(&self, id: &FractalId) -> Option<StoredFractal> {
        if let Some(hit) = self.cache_get(id) {
            return Some(hit);
        }

        let path = self.record_path(id);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<StoredFractal>(&content) {
            Ok(record) => {
                self.cache_put(id, record.clone());
                Some(record)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable fractal record");
                None
            }
        }
    }

    /// Ids with a record on disk, sorted.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|e| StoreError::io(&self.root, e))?;
        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == RECORD_EXTENSION))
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?;
                if stem.starts_with(TEMP_PREFIX) {
                    return None;
                }
                percent_decode(stem)
            })
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Drop the in-memory view; records are reloaded from disk on demand.
    pub fn clear_cache(&self) {
        self.cache.lock().unwrap_or_else(|p| p.into_inner()).clear();
    }

    fn cache_get(&self, id: &FractalId) -> Option<StoredFractal> {
        self.cache
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(id)
            .cloned()
    }

    fn cache_put(&self, id: &FractalId, record: StoredFractal) {
        self.cache
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(id.clone(), record);
    }

    /// Temp file in the storage dir, then rename over the record.
    fn persist(&self, id: &FractalId, record: &StoredFractal) -> Result<(), StoreError> {
        let path = self.record_path(id);
        let json = serde_json::to_string_pretty(record)?;

        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".json")
            .tempfile_in(&self.root)
            .map_err(|e| StoreError::io(&self.root, e))?;
        temp.write_all(json.as_bytes())
            .map_err(|e| StoreError::io(temp.path(), e))?;
        temp.persist(&path)
            .map_err(|e| StoreError::io(&path, e.error))?;
        Ok(())
    }
}
