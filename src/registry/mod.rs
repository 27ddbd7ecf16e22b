//! Fractal registry
//!
//! Stores published fractals as compiled records and serves them over HTTP
//! to runtime loaders.
//!
//! - `store`: per-id JSON records behind an in-memory view
//! - `router`: request handling, independent of the socket
//! - `server`: hyper connection loop
//! - `code`: browser delivery wrapper

pub mod code;
pub mod router;
pub mod server;
pub mod store;
pub mod types;

pub use code::wrap_commonjs;
pub use router::{RegistryRouter, DEFAULT_MAX_BODY_BYTES};
pub use server::RegistryServer;
pub use store::{RegistryStore, StoreError};
pub use types::{ApiError, FractalList, HealthStatus};
