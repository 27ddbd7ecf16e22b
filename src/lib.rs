//! Fractal - independently deployed UI components
//!
//! Fractal finds component sources marked with the `'use fractal'`
//! directive, builds each one into a standalone artifact with a dependency
//! manifest, serves those artifacts from a registry over HTTP, and loads
//! them at runtime into a host application.
//!
//! ## Layers
//!
//! - `domain` - identities, detection rules, source analysis, ports
//! - `application` - build, watch, publish and manifest use cases
//! - `infrastructure` - file system, esbuild, git and HTTP adapters
//! - `registry` - artifact store and its HTTP server
//! - `runtime` - host-side loader, cache and composition

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod registry;
pub mod runtime;

// Re-exports for convenience
pub use application::{BuildOptions, BuildReport, BuildUseCase, PublishReport, PublishUseCase};
pub use config::Config;
pub use domain::value_objects::{ArtifactIdentity, FractalId};
pub use error::{FractalError, FractalResult};
pub use registry::{RegistryRouter, RegistryServer, RegistryStore};
pub use runtime::{Fractal, FractalLoader, RuntimeMode};
