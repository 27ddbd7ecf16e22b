//! Fractal loader
//!
//! One loader per host application. A request for an id is served from the
//! cache, joins the load already in flight for that id, or starts a new one
//! on the tokio runtime. Failed loads resolve to `None`; nothing is
//! cancelled, so a load whose callers went away still fills the cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use thiserror::Error;

use super::cache::{FractalCache, LoadedFractal};
use super::component::ModuleExports;
use super::execution::{ExecutionContext, ExecutionError, LinkedExecutor};
use super::fetcher::{FetchError, HttpFetcher, RegistryFetcher};
use super::mode::RuntimeMode;
use super::module_table::{ModuleError, ModuleTable};
use super::registry_url::RegistryResolver;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

type PendingLoad = Shared<BoxFuture<'static, Option<LoadedFractal>>>;

struct LoaderInner {
    cache: FractalCache,
    pending: Mutex<HashMap<String, PendingLoad>>,
    fetcher: Arc<dyn RegistryFetcher>,
    executor: Arc<dyn ExecutionContext>,
    modules: ModuleTable,
    registry: RegistryResolver,
    mode: RuntimeMode,
}

/// Host-side setup: modules first, then preloads
#[derive(Debug, Default)]
pub struct RuntimeSetup {
    pub registry_url: Option<String>,
    pub preload: Vec<String>,
    pub modules: Vec<(String, ModuleExports)>,
}

pub struct FractalLoaderBuilder {
    fetcher: Arc<dyn RegistryFetcher>,
    executor: Arc<dyn ExecutionContext>,
    modules: ModuleTable,
    registry: Option<RegistryResolver>,
    mode: RuntimeMode,
}

impl FractalLoaderBuilder {
    pub fn fetcher(mut self, fetcher: Arc<dyn RegistryFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn executor(mut self, executor: Arc<dyn ExecutionContext>) -> Self {
        self.executor = executor;
        self
    }

    pub fn modules(mut self, modules: ModuleTable) -> Self {
        self.modules = modules;
        self
    }

    pub fn registry(mut self, registry: RegistryResolver) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn mode(mut self, mode: RuntimeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build(self) -> FractalLoader {
        let registry = self
            .registry
            .unwrap_or_else(|| RegistryResolver::new(self.mode));
        FractalLoader {
            inner: Arc::new(LoaderInner {
                cache: FractalCache::new(),
                pending: Mutex::new(HashMap::new()),
                fetcher: self.fetcher,
                executor: self.executor,
                modules: self.modules,
                registry,
                mode: self.mode,
            }),
        }
    }
}

/// Cheaply clonable handle; clones share cache and in-flight loads.
#[derive(Clone)]
pub struct FractalLoader {
    inner: Arc<LoaderInner>,
}

impl Default for FractalLoader {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl FractalLoader {
    /// HTTP fetcher and linked executor by default
    pub fn builder() -> FractalLoaderBuilder {
        FractalLoaderBuilder {
            fetcher: Arc::new(HttpFetcher::new()),
            executor: Arc::new(LinkedExecutor::new()),
            modules: ModuleTable::new(),
            registry: None,
            mode: RuntimeMode::default(),
        }
    }

    pub fn modules(&self) -> &ModuleTable {
        &self.inner.modules
    }

    pub fn cache(&self) -> &FractalCache {
        &self.inner.cache
    }

    pub fn mode(&self) -> RuntimeMode {
        self.inner.mode
    }

    /// Registry used for `id` when no override is given
    pub fn registry_url(&self, override_url: Option<&str>) -> String {
        self.inner.registry.resolve(override_url)
    }

    /// Synchronous cache probe
    pub fn cached(&self, id: &str) -> Option<LoadedFractal> {
        self.inner.cache.get(id)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending().contains_key(id)
    }

    /// Resolve `id`, loading it at most once at a time.
    ///
    /// Must be called within a tokio runtime.
    pub async fn use_fractal(&self, id: &str, registry: Option<&str>) -> Option<LoadedFractal> {
        if let Some(hit) = self.cached(id) {
            return Some(hit);
        }
        self.load_shared(id, registry).await
    }

    /// Start loading `id` without waiting. No-op outside a tokio runtime
    /// or when already cached.
    pub fn request(&self, id: &str, registry: Option<&str>) {
        if self.inner.cache.contains(id) {
            return;
        }
        if tokio::runtime::Handle::try_current().is_err() {
            tracing::debug!(%id, "no async runtime; fractal load not started");
            return;
        }
        let _ = self.load_shared(id, registry);
    }

    /// Warm the cache for `ids`. Errors are swallowed.
    pub fn preload<S: AsRef<str>>(&self, registry: &str, ids: &[S]) {
        for id in ids {
            self.request(id.as_ref(), Some(registry));
        }
    }

    /// Register host modules, then preload.
    pub fn setup(&self, setup: RuntimeSetup) -> Result<(), ModuleError> {
        for (name, exports) in setup.modules {
            self.inner.modules.register(&name, exports)?;
        }
        if !setup.preload.is_empty() {
            let registry = self.registry_url(setup.registry_url.as_deref());
            self.preload(&registry, &setup.preload);
        }
        Ok(())
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<String, PendingLoad>> {
        self.inner.pending.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn load_shared(&self, id: &str, registry: Option<&str>) -> PendingLoad {
        let mut pending = self.pending();
        if let Some(load) = pending.get(id) {
            return load.clone();
        }
        // a load may have finished between the caller's probe and this lock
        if let Some(hit) = self.cached(id) {
            return futures::future::ready(Some(hit)).boxed().shared();
        }

        let registry = self.registry_url(registry);
        let this = self.clone();
        let owned_id = id.to_string();
        let task = tokio::spawn(async move { this.load(owned_id, registry).await });
        let load = async move { task.await.ok().flatten() }.boxed().shared();
        pending.insert(id.to_string(), load.clone());
        load
    }

    async fn load(&self, id: String, registry: String) -> Option<LoadedFractal> {
        let _pending = PendingGuard { loader: self, id: &id };
        match self.fetch_and_execute(&id, &registry).await {
            Ok(fractal) => {
                tracing::debug!(%id, "fractal loaded");
                self.inner.cache.put(fractal.clone());
                Some(fractal)
            }
            Err(e) => {
                if self.inner.mode.is_development() {
                    tracing::warn!(%id, %registry, error = %e, "failed to load fractal");
                }
                None
            }
        }
    }

    async fn fetch_and_execute(&self, id: &str, registry: &str) -> Result<LoadedFractal, LoadError> {
        let metadata = self.inner.fetcher.fetch_metadata(registry, id).await?;
        let code = self.inner.fetcher.fetch_code(&metadata.url).await?;
        let exports = self
            .inner
            .executor
            .execute(id, &code, &self.inner.modules)?;
        let component = exports
            .entry_component()
            .ok_or_else(|| ExecutionError::NoEntryComponent { id: id.to_string() })?;
        Ok(LoadedFractal {
            id: id.to_string(),
            component,
            styles: metadata.styles,
        })
    }
}

/// Clears the pending entry when a load ends, including by unwinding out of
/// a fetcher or executor.
struct PendingGuard<'a> {
    loader: &'a FractalLoader,
    id: &'a str,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.loader.pending().remove(self.id);
    }
}
