use std::path::Path;

use fractal::config::ConfigError;
use fractal::domain::ports::{BundleError, PublishError};
use fractal::FractalError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::terminal::{detect_for, Stream};

/// Hint shown under known errors
fn fix_for(err: &FractalError) -> Option<String> {
    match err {
        FractalError::DirectoryNotFound { path } => Some(format!(
            "Check the --input path; '{}' does not exist.",
            path.display()
        )),
        FractalError::Bundle(BundleError::NotFound { program }) => Some(format!(
            "Install esbuild (npm i -D esbuild) or point [bundler] esbuild / FRACTAL_ESBUILD at it. Tried '{program}'."
        )),
        FractalError::Config(ConfigError::Parse { .. }) => {
            Some("Fix the TOML syntax and try again.".to_string())
        }
        FractalError::Publish(PublishError::Transport(_)) => {
            Some("Is the registry running? Start one with `fractal serve`.".to_string())
        }
        _ => None,
    }
}

fn error_file(err: &FractalError) -> Option<&Path> {
    match err {
        FractalError::Config(ConfigError::Read { path, .. })
        | FractalError::Config(ConfigError::Parse { path, .. }) => Some(path.as_path()),
        FractalError::PackageNotFound { file } => Some(file.as_path()),
        FractalError::Publish(PublishError::Artifact { path, .. }) => Some(path.as_path()),
        _ => None,
    }
}

pub fn format_error_with(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(err.to_string()).bold().render(supports_color)
    );

    let Some(fractal) = err.downcast_ref::<FractalError>() else {
        return out;
    };
    if let Some(file) = error_file(fractal) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            file.display()
        ));
    }
    if let Some(fix) = fix_for(fractal) {
        out.push_str(&format!(
            "  {}\n",
            ColoredText::dim(format!("Fix: {fix}")).render(supports_color)
        ));
    }
    out
}

pub fn format_error(err: &anyhow::Error) -> String {
    let caps = detect_for(Stream::Stderr);
    format_error_with(err, caps.supports_color, caps.supports_unicode)
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    if detect_for(Stream::Stderr).github_actions {
        let file = err
            .downcast_ref::<FractalError>()
            .and_then(error_file)
            .map(|p| p.to_string_lossy().to_string());
        println!(
            "{}",
            crate::ui::ci::github_actions_annotation(
                crate::ui::ci::AnnotationLevel::Error,
                &err.to_string(),
                file.as_deref(),
                None,
                Some("Fractal"),
            )
        );
    }

    eprint!("{}", format_error(err));
}
