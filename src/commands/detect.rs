use std::path::{Path, PathBuf};

use anyhow::Result;
use fractal::domain::ports::PackageResolver;
use fractal::infrastructure::{FractalDetector, FsPackageResolver};
use fractal::ArtifactIdentity;

use crate::ui::context::UiContext;

pub fn cmd_detect(input: &Path, ui: UiContext) -> Result<()> {
    let config = super::load_config(input, &ui)?;
    let found = detect(input, &config.build.extensions, &config.build.exclude)?;

    if ui.json {
        for (path, identity) in &found {
            crate::ui::json::emit_for(
                "detect",
                serde_json::json!({
                    "event": "fractal",
                    "path": path.display().to_string(),
                    "name": identity.as_ref().map(|i| i.to_string()),
                }),
            )?;
        }
        crate::ui::json::emit_for(
            "detect",
            serde_json::json!({"event": "complete", "count": found.len()}),
        )?;
    } else {
        print!(
            "{}",
            crate::ui::views::detect::render_detect_list(input, &found, ui.color, ui.unicode)
        );
    }
    Ok(())
}

/// Detected sources, each with the identity it would build as (`None`
/// when no owning package is found)
fn detect(
    input: &Path,
    extensions: &[String],
    exclude: &[String],
) -> fractal::FractalResult<Vec<(PathBuf, Option<ArtifactIdentity>)>> {
    let detector = FractalDetector::new()
        .with_extensions(extensions)
        .with_excluded(exclude);
    let resolver = FsPackageResolver::new();

    let found = detector
        .find_fractals(input)?
        .into_iter()
        .map(|artifact| {
            let identity = resolver
                .find_closest_package(artifact.path())
                .map(|package| resolver.generate_fractal_name(&package, &artifact.file_name));
            (artifact.file_path, identity)
        })
        .collect();
    Ok(found)
}
