//! Domain Layer
//!
//! The core of Fractal: naming, detection rules, source analysis and the
//! records that flow between build, registry and runtime.
//!
//! ## Structure
//!
//! - `entities/` - Records with a lifecycle (DetectedArtifact, FractalManifest, StoredFractal)
//! - `value_objects/` - Immutable value types (ArtifactIdentity, FractalId, Classification)
//! - `services/` - Pure analyses (lexer, transformer, style extraction, compiler)
//! - `ports/` - Interface definitions for infrastructure (Bundler, PackageResolver)
//!
//! ## Design Principles
//!
//! 1. **Minimal I/O** - analyses take strings; only `transform_file` and
//!    `ContentHash::of_file` read files, and the bundler sits behind a port
//! 2. **Pure Functions** - analyses are deterministic and testable
//! 3. **Ports & Adapters** - subprocesses and the network go through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
