use std::path::Path;

use fractal::application::PublishReport;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub fn render_publish_header(
    output: &Path,
    registry: &str,
    artifact_count: usize,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Publish, "Fractal Publish");
    header.add("Artifacts", format!("{} in {}", artifact_count, output.display()));
    header.add("Registry", registry);
    header.render(supports_color, supports_unicode)
}

pub fn render_publish_summary(
    report: &PublishReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if report.is_success() {
        ResultSummary::success("Publish Complete")
    } else {
        ResultSummary::partial("Publish Finished With Errors")
    };
    summary.add_stat("published", report.published.len());
    summary.add_stat("failed", report.failed.len());
    for failed in &report.failed {
        summary.add_failure(failed.name.as_str(), failed.error.as_str());
    }
    if !report.failed.is_empty() {
        summary.with_next_step("Build output was kept; rerun `fractal publish` to retry");
    }
    summary.render(supports_color, supports_unicode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractal::application::FailedUpload;

    #[test]
    fn header_shows_target_registry() {
        let rendered =
            render_publish_header(Path::new("dist/fractals"), "http://localhost:3001", 2, false, false);
        assert!(rendered.contains("[PUBLISH] Fractal Publish"));
        assert!(rendered.contains("2 in dist/fractals"));
        assert!(rendered.contains("http://localhost:3001"));
    }

    #[test]
    fn failures_suggest_a_retry() {
        let report = PublishReport {
            published: Vec::new(),
            failed: vec![FailedUpload {
                name: "acme::card::1.0.0".to_string(),
                error: "registry returned 422".to_string(),
            }],
        };
        let rendered = render_publish_summary(&report, false, false);
        assert!(rendered.contains("0 published, 1 failed"));
        assert!(rendered.contains("acme::card::1.0.0: registry returned 422"));
        assert!(rendered.contains("fractal publish"));
    }
}
