//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_events;
pub mod bundler;
pub mod classifier;
pub mod package_resolver;
pub mod registry_publisher;

pub use build_events::{BuildEvent, BuildEventSink, NoopEventSink};
pub use bundler::{
    BundleError, BundleOutput, BundleRequest, Bundler, JsxTransform, Loader, ModuleFormat,
    Platform, TransformRequest,
};
pub use classifier::SourceClassifier;
pub use package_resolver::PackageResolver;
pub use registry_publisher::{PublishError, RegistryPublisher};
