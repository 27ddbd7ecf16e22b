//! JSON Event Sink
//!
//! Outputs build and publish events as NDJSON for CI/automation consumption.

use crate::domain::ports::{BuildEvent, BuildEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }

    /// NDJSON form of one event
    pub fn to_json(event: &BuildEvent) -> serde_json::Value {
        match event {
            BuildEvent::Started {
                input,
                candidate_count,
            } => serde_json::json!({
                "event": "start",
                "command": "build",
                "input": input.display().to_string(),
                "candidates": candidate_count,
            }),

            BuildEvent::ItemBuilt {
                index,
                path,
                name,
                output,
                size,
            } => serde_json::json!({
                "event": "item_built",
                "command": "build",
                "index": index,
                "path": path.display().to_string(),
                "name": name,
                "output": output.display().to_string(),
                "size": size,
            }),

            BuildEvent::ItemSkipped {
                index,
                path,
                reason,
            } => serde_json::json!({
                "event": "item_skipped",
                "command": "build",
                "index": index,
                "path": path.display().to_string(),
                "reason": reason,
            }),

            BuildEvent::ItemFailed { index, path, error } => serde_json::json!({
                "event": "item_error",
                "command": "build",
                "index": index,
                "path": path.display().to_string(),
                "error": error,
            }),

            BuildEvent::Completed {
                built,
                skipped,
                failed,
            } => {
                let status = if *failed == 0 { "success" } else { "partial" };
                serde_json::json!({
                    "event": "complete",
                    "command": "build",
                    "status": status,
                    "built": built,
                    "skipped": skipped,
                    "failed": failed,
                })
            }

            BuildEvent::Published { name, registry } => serde_json::json!({
                "event": "item_published",
                "command": "publish",
                "name": name,
                "registry": registry,
            }),

            BuildEvent::PublishFailed { name, error } => serde_json::json!({
                "event": "item_error",
                "command": "publish",
                "name": name,
                "error": error,
            }),

            BuildEvent::PublishCompleted { published, failed } => {
                let status = if *failed == 0 { "success" } else { "partial" };
                serde_json::json!({
                    "event": "complete",
                    "command": "publish",
                    "status": status,
                    "published": published,
                    "failed": failed,
                })
            }
        }
    }
}

impl BuildEventSink for JsonEventSink {
    fn on_event(&self, event: BuildEvent) {
        self.write_event(Self::to_json(&event));
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
