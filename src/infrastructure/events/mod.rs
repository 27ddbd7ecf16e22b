//! Event sink implementations
//!
//! - `JsonEventSink`: NDJSON output for CI/automation
//!
//! The console sink lives with the CLI's `ui` layer.

mod json;

pub use json::JsonEventSink;
