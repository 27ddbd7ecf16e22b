//! Domain Entities
//!
//! - `DetectedArtifact` - a source file selected for building
//! - `PackageInfo` / `PackageDescriptor` - the owning package
//! - `FractalManifest` - provenance written beside each artifact
//! - `BuildMetadata` - per-artifact build record
//! - `StoredFractal` - the registry's unit of storage, plus wire shapes

mod build_metadata;
mod detected;
mod manifest;
mod package;
mod stored;

pub use build_metadata::BuildMetadata;
pub use detected::DetectedArtifact;
pub use manifest::{DependencySet, FractalManifest, ParentApplication, RepositoryInfo, SourceLocation};
pub use package::{PackageDescriptor, PackageInfo};
pub use stored::{FractalMetadata, PublishReceipt, PublishRequest, StoredFractal};
