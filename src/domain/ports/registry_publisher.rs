//! Registry publisher port
//!
//! Uploads one fractal source (plus its manifest) to a registry. The HTTP
//! adapter is `infrastructure::http::RegistryClient`.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::{PublishReceipt, PublishRequest};
use crate::domain::value_objects::FractalId;

#[derive(Debug, Error)]
pub enum PublishError {
    /// Registry answered with a non-success status
    #[error("registry rejected {id} ({status}): {message}")]
    Rejected {
        id: String,
        status: u16,
        message: String,
    },

    #[error("could not reach registry: {0}")]
    Transport(String),

    #[error("unexpected registry response: {0}")]
    InvalidResponse(String),

    /// Build output could not be read back
    #[error("unreadable build artifact {path}: {message}")]
    Artifact { path: PathBuf, message: String },
}

pub trait RegistryPublisher: Send + Sync {
    /// Base URL of the registry, for reporting
    fn registry_url(&self) -> &str;

    fn publish(&self, id: &FractalId, request: &PublishRequest)
        -> Result<PublishReceipt, PublishError>;
}
