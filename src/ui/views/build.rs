use std::path::Path;

use fractal::application::BuildReport;
use fractal::domain::ports::BuildEvent;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_build_header(
    input: &Path,
    output: &Path,
    registry: Option<&str>,
    jobs: usize,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Build, "Fractal Build");
    header.add("Input", input.display().to_string());
    header.add("Output", output.display().to_string());
    if let Some(registry) = registry {
        header.add("Registry", registry);
    }
    if jobs > 1 {
        header.add("Jobs", jobs.to_string());
    }
    header.render(supports_color, supports_unicode)
}

/// One progress line per event; `None` for events shown only in summaries
pub fn render_build_event(
    event: &BuildEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> Option<String> {
    let line = match event {
        BuildEvent::Started {
            candidate_count, ..
        } => format!(
            "{} Found {} fractal source{}\n",
            Icon::Progress.colored(supports_color, supports_unicode),
            candidate_count,
            if *candidate_count == 1 { "" } else { "s" }
        ),
        BuildEvent::ItemBuilt { name, size, .. } => format!(
            "  {} {} {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            name,
            ColoredText::dim(format_size(*size)).render(supports_color)
        ),
        BuildEvent::ItemSkipped { path, reason, .. } => format!(
            "  {} {} {}\n",
            Icon::Skipped.colored(supports_color, supports_unicode),
            path.display(),
            ColoredText::dim(format!("({reason})")).render(supports_color)
        ),
        BuildEvent::ItemFailed { path, error, .. } => format!(
            "  {} {}\n      {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            path.display(),
            ColoredText::error(error.as_str()).render(supports_color)
        ),
        BuildEvent::Published { name, registry } => format!(
            "  {} {} {}\n",
            Icon::Publish.colored(supports_color, supports_unicode),
            name,
            ColoredText::dim(format!("→ {registry}")).render(supports_color)
        ),
        BuildEvent::PublishFailed { name, error } => format!(
            "  {} {}: {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            name,
            ColoredText::error(error.as_str()).render(supports_color)
        ),
        BuildEvent::Completed { .. } | BuildEvent::PublishCompleted { .. } => return None,
    };
    Some(line)
}

pub fn render_build_summary(
    report: &BuildReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if report.is_success() {
        ResultSummary::success("Build Complete")
    } else {
        ResultSummary::partial("Build Finished With Errors")
    };
    summary.add_stat("built", report.built.len());
    summary.add_stat("skipped", report.skipped.len());
    summary.add_stat("failed", report.failed.len());
    for failed in &report.failed {
        summary.add_failure(failed.source.display().to_string(), failed.error.as_str());
    }
    if report.total() == 0 {
        summary.with_next_step("Start a component file with 'use fractal'; to mark it");
    }
    summary.render(supports_color, supports_unicode)
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractal::application::FailedFractal;
    use std::path::PathBuf;

    #[test]
    fn built_line_shows_identity_and_size() {
        let event = BuildEvent::ItemBuilt {
            index: 0,
            path: PathBuf::from("src/Card.tsx"),
            name: "acme::card::1.0.0".to_string(),
            output: PathBuf::from("dist/fractals/acme_card_1.0.0.js"),
            size: 2048,
        };
        let line = render_build_event(&event, false, false).unwrap();
        assert_eq!(line, "  [OK] acme::card::1.0.0 2.0 KB\n");
    }

    #[test]
    fn completion_is_left_to_the_summary() {
        let event = BuildEvent::Completed {
            built: 1,
            skipped: 0,
            failed: 0,
        };
        assert!(render_build_event(&event, false, false).is_none());
    }

    #[test]
    fn summary_lists_failed_sources() {
        let mut report = BuildReport::new();
        report.failed.push(FailedFractal {
            source: PathBuf::from("src/Broken.tsx"),
            error: "bundler failed".to_string(),
        });

        let rendered = render_build_summary(&report, false, false);
        assert!(rendered.contains("Build Finished With Errors"));
        assert!(rendered.contains("0 built, 0 skipped, 1 failed"));
        assert!(rendered.contains("src/Broken.tsx: bundler failed"));
    }

    #[test]
    fn empty_build_suggests_the_directive() {
        let rendered = render_build_summary(&BuildReport::new(), false, false);
        assert!(rendered.contains("'use fractal'"));
    }
}
