//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `detector` - Source tree walk and directive classification
//! - `package_finder` - `package.json` lookup with a per-directory cache
//! - `git` - Repository coordinates via the `git` executable
//! - `bundler/` - Bundler adapters (esbuild)
//! - `events/` - Event sinks (NDJSON)
//! - `http` - Blocking registry client

pub mod bundler;
pub mod detector;
pub mod events;
pub mod git;
pub mod http;
pub mod package_finder;

// Re-export for convenience
pub use bundler::EsbuildBundler;
pub use detector::{DirectiveClassifier, FractalDetector, DEFAULT_EXCLUDED_DIRS};
pub use events::JsonEventSink;
pub use git::{normalize_remote_url, GitInfoExtractor};
pub use http::RegistryClient;
pub use package_finder::{FsPackageResolver, PackageCache};
