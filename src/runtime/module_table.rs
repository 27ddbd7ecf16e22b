//! Host module table
//!
//! Modules the host application provides to loaded fractals, keyed by
//! specifier (`react`, `@acme/design-system`) or by fractal id. Clones share
//! the same table.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use super::component::ModuleExports;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleError {
    #[error("module name must be a non-empty string")]
    EmptyName,

    #[error("module '{0}' has no exports")]
    EmptyModule(String),
}

#[derive(Debug, Clone, Default)]
pub struct ModuleTable {
    modules: Arc<RwLock<HashMap<String, ModuleExports>>>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace `name`
    pub fn register(&self, name: &str, exports: ModuleExports) -> Result<(), ModuleError> {
        if name.trim().is_empty() {
            return Err(ModuleError::EmptyName);
        }
        if exports.is_empty() {
            return Err(ModuleError::EmptyModule(name.to_string()));
        }
        self.write().insert(name.to_string(), exports);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<ModuleExports> {
        self.read().get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ModuleExports>> {
        self.modules.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ModuleExports>> {
        self.modules.write().unwrap_or_else(|p| p.into_inner())
    }
}
