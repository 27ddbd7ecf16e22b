//! Build Event Port
//!
//! Observable interface for build and publish runs. Enables progress
//! reporting, NDJSON event streams and testing.

use std::path::PathBuf;

/// Event emitted during build and publish operations
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    /// Detection finished
    Started { input: PathBuf, candidate_count: usize },

    /// Candidate built; artifacts written
    ItemBuilt {
        index: usize,
        path: PathBuf,
        name: String,
        output: PathBuf,
        size: u64,
    },

    /// Candidate skipped (no owning package)
    ItemSkipped {
        index: usize,
        path: PathBuf,
        reason: String,
    },

    /// Candidate failed (transform or bundler error)
    ItemFailed {
        index: usize,
        path: PathBuf,
        error: String,
    },

    /// Build run finished
    Completed {
        built: usize,
        skipped: usize,
        failed: usize,
    },

    /// Artifact uploaded to the registry
    Published { name: String, registry: String },

    /// Artifact upload failed
    PublishFailed { name: String, error: String },

    /// Publish run finished
    PublishCompleted { published: usize, failed: usize },
}

/// Trait for receiving build events
///
/// Implementations:
/// - `JsonEventSink`: NDJSON stream for CI
/// - the CLI's console sink: progress lines in the terminal
/// - `NoopEventSink`: silent operation
pub trait BuildEventSink: Send + Sync {
    fn on_event(&self, event: BuildEvent);

    /// Whether this sink wants per-item events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BuildEventSink for NoopEventSink {
    fn on_event(&self, _event: BuildEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
