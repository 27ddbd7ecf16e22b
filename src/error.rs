//! Error types for Fractal
//!
//! Each layer owns a focused `thiserror` enum; `FractalError` folds them
//! together for callers that cross layers.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::{BundleError, PublishError};
use crate::domain::services::CompileError;
use crate::registry::StoreError;
use crate::runtime::{LoadError, ModuleError};

/// Result type alias for Fractal operations
pub type FractalResult<T> = Result<T, FractalError>;

/// Main error type for Fractal operations
#[derive(Error, Debug)]
pub enum FractalError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Bundler invocation failed
    #[error(transparent)]
    Bundle(#[from] BundleError),

    /// Server-side compile step rejected the source
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Input directory does not exist
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// No package.json with name and version above the source file
    #[error("no package.json with a name and version found above {file}")]
    PackageNotFound { file: PathBuf },

    /// Registry storage failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Upload to the registry failed
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Runtime load failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Host module registration was rejected
    #[error(transparent)]
    Module(#[from] ModuleError),

    /// File watcher could not be started
    #[error("watch error: {0}")]
    Watch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_directory_not_found() {
        let err = FractalError::DirectoryNotFound {
            path: PathBuf::from("components"),
        };
        assert_eq!(err.to_string(), "directory not found: components");
    }

    #[test]
    fn test_error_display_package_not_found() {
        let err = FractalError::PackageNotFound {
            file: PathBuf::from("src/Button.tsx"),
        };
        assert_eq!(
            err.to_string(),
            "no package.json with a name and version found above src/Button.tsx"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: FractalError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_error_from_layer_errors_is_transparent() {
        let err: FractalError = ModuleError::EmptyName.into();
        assert_eq!(err.to_string(), "module name must be a non-empty string");

        let err: FractalError = StoreError::Compile(CompileError::MissingDirective).into();
        assert_eq!(err.to_string(), "Missing fractal directive");
    }
}
