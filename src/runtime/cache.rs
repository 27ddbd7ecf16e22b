//! Loaded fractal cache

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use super::component::SharedComponent;

/// A fractal ready to render
#[derive(Clone)]
pub struct LoadedFractal {
    pub id: String,
    pub component: SharedComponent,
    pub styles: Option<String>,
}

impl fmt::Debug for LoadedFractal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedFractal")
            .field("id", &self.id)
            .field("styles", &self.styles)
            .finish_non_exhaustive()
    }
}

/// Loaded fractals by id. Entries live until invalidated.
#[derive(Default)]
pub struct FractalCache {
    entries: Mutex<HashMap<String, LoadedFractal>>,
}

impl FractalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<LoadedFractal> {
        self.lock().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    pub fn put(&self, fractal: LoadedFractal) {
        self.lock().insert(fractal.id.clone(), fractal);
    }

    pub fn invalidate(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, LoadedFractal>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}
