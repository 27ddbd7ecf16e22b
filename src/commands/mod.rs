//! Subcommand implementations
//!
//! Each command loads configuration for its project root, applies CLI
//! overrides, wires infrastructure into a use case and renders the result
//! as text or NDJSON.

pub mod build;
pub mod detect;
pub mod publish;
pub mod serve;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use fractal::domain::ports::BuildEventSink;
use fractal::infrastructure::JsonEventSink;
use fractal::{Config, FractalError};

use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;

/// `<root>/fractal.toml`, else the user config, then `FRACTAL_*`.
/// Unknown keys are reported on stderr in text mode.
pub fn load_config(root: &Path, ui: &UiContext) -> Result<Config> {
    let (config, warnings) = Config::discover(Some(root)).map_err(FractalError::from)?;
    if !ui.json {
        crate::ui::output::print_config_warnings(&warnings, ui.unicode);
    }
    Ok(config)
}

/// NDJSON in `--json` mode, progress lines otherwise
pub fn event_sink(ui: &UiContext) -> Arc<dyn BuildEventSink> {
    if ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(*ui))
    }
}
