//! Build Module
//!
//! Detects fractal sources, transforms and bundles each one into an
//! artifact, then writes its manifest and build metadata.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`BuildOptions`)
//! - `result` - Result types (`BuildReport`, `BuildOutcome`)
//! - `use_case` - Core use case logic (`BuildUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use fractal::application::build::{BuildOptions, BuildUseCase};
//!
//! let use_case = BuildUseCase::new(Arc::new(EsbuildBundler::default()));
//! let report = use_case.build(&BuildOptions::new("src", "dist/fractals"))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::BuildOptions;
pub use result::{BuildOutcome, BuildReport, BuiltFractal, FailedFractal, SkippedFractal};
pub use use_case::BuildUseCase;
