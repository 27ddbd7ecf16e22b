use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use fractal::application::PublishUseCase;
use fractal::infrastructure::RegistryClient;
use fractal::FractalError;

use crate::ui::context::UiContext;

pub fn cmd_publish(output: Option<PathBuf>, registry: Option<String>, ui: UiContext) -> Result<()> {
    let config = super::load_config(Path::new("."), &ui)?;
    let output = output.unwrap_or_else(|| config.build.output.clone());
    let Some(registry) = registry.or(config.registry.url.clone()) else {
        bail!("no registry URL; pass --registry, set FRACTAL_REGISTRY_URL, or add [registry] url to fractal.toml");
    };

    if !output.is_dir() {
        return Err(FractalError::DirectoryNotFound { path: output }.into());
    }
    let artifacts = PublishUseCase::metadata_files(&output)
        .with_context(|| format!("reading build output {}", output.display()))?;

    if !ui.json {
        print!(
            "{}",
            crate::ui::views::publish::render_publish_header(
                &output,
                &registry,
                artifacts.len(),
                ui.color,
                ui.unicode,
            )
        );
    }

    let use_case = PublishUseCase::new(Arc::new(RegistryClient::new(registry)));
    let report = use_case.publish_artifacts(&artifacts, super::event_sink(&ui));

    if !ui.json {
        print!(
            "{}",
            crate::ui::views::publish::render_publish_summary(&report, ui.color, ui.unicode)
        );
    }

    if !report.is_success() {
        bail!(
            "{} of {} artifacts failed to publish",
            report.failed.len(),
            artifacts.len()
        );
    }
    Ok(())
}
