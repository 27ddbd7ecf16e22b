//! Fractal runtime
//!
//! Host-side loading of published fractals: fetch from a registry, execute
//! against the host's modules, cache, and compose into markup.
//!
//! ```text
//! Fractal::render ─▶ FractalLoader ─▶ FractalCache (hit)
//!                          │
//!                          ├─▶ pending load (join)
//!                          └─▶ RegistryFetcher ─▶ ExecutionContext ─▶ cache
//! ```

pub mod cache;
pub mod component;
pub mod execution;
pub mod fetcher;
pub mod fractal;
pub mod loader;
pub mod mode;
pub mod module_table;
pub mod registry_url;

pub use cache::{FractalCache, LoadedFractal};
pub use component::{Component, ModuleExports, Props, SharedComponent, DEFAULT_EXPORT};
pub use execution::{registered_names, ExecutionContext, ExecutionError, LinkedExecutor};
pub use fetcher::{metadata_url, FetchError, HttpFetcher, RegistryFetcher};
pub use fractal::{compose, Fractal, FractalSlot};
pub use loader::{FractalLoader, FractalLoaderBuilder, LoadError, RuntimeSetup};
pub use mode::RuntimeMode;
pub use module_table::{ModuleError, ModuleTable};
pub use registry_url::{RegistryResolver, REGISTRY_URL_ENV};
