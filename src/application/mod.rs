//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BuildUseCase` - Detect, transform, bundle, write manifest and metadata
//! - `WatchUseCase` - Initial build, then rebuild changed sources
//! - `PublishUseCase` - Upload built artifacts to a registry
//!
//! ## Services
//!
//! - `ManifestGenerator` - Per-artifact manifest from source, package and git

pub mod build;
pub mod manifest;
pub mod publish;
pub mod watch;

pub use build::{
    BuildOptions, BuildOutcome, BuildReport, BuildUseCase, BuiltFractal, FailedFractal,
    SkippedFractal,
};
pub use manifest::ManifestGenerator;
pub use publish::{FailedUpload, PublishReport, PublishUseCase};
pub use watch::{
    ContentTracker, WatchEvent, WatchOptions, WatchUseCase, WatcherState, DEBOUNCE_MS,
};
