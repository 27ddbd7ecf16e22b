//! Composing loaded fractals into host markup

use std::sync::{Arc, Mutex, MutexGuard};

use super::cache::LoadedFractal;
use super::component::Props;
use super::loader::FractalLoader;

/// A remote component placed in host markup
#[derive(Debug, Clone, PartialEq)]
pub struct Fractal {
    pub id: String,
    pub props: Props,
    /// Markup shown until the fractal resolves, and when it fails
    pub fallback: String,
    pub registry: Option<String>,
}

impl Fractal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            props: Props::Object(Default::default()),
            fallback: String::new(),
            registry: None,
        }
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn with_registry(mut self, registry: impl Into<String>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// Render from the cache; on a miss, start the load and render the
    /// fallback.
    pub fn render(&self, loader: &FractalLoader) -> String {
        match loader.cached(&self.id) {
            Some(loaded) => compose(&loaded, &self.props),
            None => {
                loader.request(&self.id, self.registry.as_deref());
                self.fallback.clone()
            }
        }
    }

    /// Wait for the load, then render.
    pub async fn render_async(&self, loader: &FractalLoader) -> String {
        match loader.use_fractal(&self.id, self.registry.as_deref()).await {
            Some(loaded) => compose(&loaded, &self.props),
            None => self.fallback.clone(),
        }
    }
}

/// `<style>` (when the fractal has styles) followed by the component output
pub fn compose(loaded: &LoadedFractal, props: &Props) -> String {
    let body = loaded.component.render(props);
    match loaded.styles.as_deref().filter(|s| !s.is_empty()) {
        Some(styles) => format!("<style>{styles}</style>{body}"),
        None => body,
    }
}

#[derive(Debug, Default)]
struct SlotState {
    id: Option<String>,
    resolved: Option<LoadedFractal>,
}

/// Consumer whose fractal id can change while loads are in flight.
///
/// A resolution is adopted only if its id is still the current one.
#[derive(Debug, Clone, Default)]
pub struct FractalSlot {
    state: Arc<Mutex<SlotState>>,
}

impl FractalSlot {
    pub fn new(id: impl Into<String>) -> Self {
        let slot = Self::default();
        slot.set_id(id);
        slot
    }

    /// Switch ids; the previous resolution is dropped.
    pub fn set_id(&self, id: impl Into<String>) {
        let mut state = self.lock();
        state.id = Some(id.into());
        state.resolved = None;
    }

    pub fn current_id(&self) -> Option<String> {
        self.lock().id.clone()
    }

    pub fn current(&self) -> Option<LoadedFractal> {
        self.lock().resolved.clone()
    }

    /// Load the current id. Returns whether the result was adopted.
    pub async fn refresh(&self, loader: &FractalLoader, registry: Option<&str>) -> bool {
        let Some(id) = self.current_id() else {
            return false;
        };
        let loaded = loader.use_fractal(&id, registry).await;

        let mut state = self.lock();
        if state.id.as_deref() != Some(id.as_str()) {
            tracing::debug!(%id, "discarding load for a replaced fractal id");
            return false;
        }
        state.resolved = loaded;
        state.resolved.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}
