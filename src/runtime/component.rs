//! Host component model
//!
//! A component renders JSON props to markup. Modules expose components under
//! export names, with `default` as the conventional entry point.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Component props
pub type Props = serde_json::Value;

pub trait Component: Send + Sync {
    fn render(&self, props: &Props) -> String;
}

impl<F> Component for F
where
    F: Fn(&Props) -> String + Send + Sync,
{
    fn render(&self, props: &Props) -> String {
        self(props)
    }
}

pub type SharedComponent = Arc<dyn Component>;

pub const DEFAULT_EXPORT: &str = "default";

/// Named exports of one module
#[derive(Clone, Default)]
pub struct ModuleExports {
    exports: BTreeMap<String, SharedComponent>,
}

impl ModuleExports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Module whose default export is `component`
    pub fn with_default(component: impl Component + 'static) -> Self {
        Self::new().with_export(DEFAULT_EXPORT, component)
    }

    pub fn with_export(mut self, name: impl Into<String>, component: impl Component + 'static) -> Self {
        self.exports.insert(name.into(), Arc::new(component));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, component: SharedComponent) {
        self.exports.insert(name.into(), component);
    }

    pub fn get(&self, name: &str) -> Option<SharedComponent> {
        self.exports.get(name).cloned()
    }

    /// The `default` export, or the only export when there is exactly one.
    pub fn entry_component(&self) -> Option<SharedComponent> {
        if let Some(default) = self.exports.get(DEFAULT_EXPORT) {
            return Some(default.clone());
        }
        match self.exports.len() {
            1 => self.exports.values().next().cloned(),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exports.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}

impl fmt::Debug for ModuleExports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleExports")
            .field("exports", &self.exports.keys().collect::<Vec<_>>())
            .finish()
    }
}
