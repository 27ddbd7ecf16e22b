//! Watch Use Case
//!
//! Continuous rebuilds while sources change. It orchestrates:
//! - File system monitoring (via `notify` crate)
//! - Debouncing (100ms default)
//! - Content-hash filtering (editor saves without changes are ignored)
//! - Single-file rebuilds through the build pipeline
//!
//! ## Usage
//!
//! ```ignore
//! let options = WatchOptions::new(BuildOptions::new("src", "dist/fractals"));
//! let use_case = WatchUseCase::new(build, options);
//! use_case.start(running, |event| { ... });
//! ```

mod cache;
mod event;
mod use_case;

#[cfg(test)]
mod tests;

pub use cache::ContentTracker;
pub use event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
pub use use_case::WatchUseCase;
