//! Terminal presentation for the `fractal` binary
//!
//! - `theme` / `primitives` - colors and icons with ASCII fallbacks
//! - `blocks` - header and summary blocks shared by commands
//! - `views` - per-command rendering
//! - `console` - human-readable build event sink
//! - `json` - NDJSON output

pub mod blocks;
pub mod ci;
pub mod console;
pub mod context;
pub mod error;
pub mod json;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
