use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Closing block of a command: title, counters, then failures
#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    success: bool,
    stats: Vec<(String, usize)>,
    failures: Vec<(String, String)>,
    next_step: Option<String>,
}

impl ResultSummary {
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, true)
    }

    pub fn partial(title: impl Into<String>) -> Self {
        Self::new(title, false)
    }

    fn new(title: impl Into<String>, success: bool) -> Self {
        Self {
            title: title.into(),
            success,
            stats: Vec::new(),
            failures: Vec::new(),
            next_step: None,
        }
    }

    pub fn add_stat(&mut self, label: impl Into<String>, count: usize) {
        self.stats.push((label.into(), count));
    }

    /// A failed item and its error
    pub fn add_failure(&mut self, item: impl Into<String>, error: impl Into<String>) {
        self.failures.push((item.into(), error.into()));
    }

    pub fn with_next_step(&mut self, hint: impl Into<String>) {
        self.next_step = Some(hint.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let (icon, title) = if self.success {
            (
                Icon::Success,
                ColoredText::success(self.title.as_str()).bold(),
            )
        } else {
            (
                Icon::Warning,
                ColoredText::warning(self.title.as_str()).bold(),
            )
        };

        let mut out = format!(
            "\n{} {}\n",
            icon.colored(supports_color, supports_unicode),
            title.render(supports_color)
        );

        let stats: Vec<String> = self
            .stats
            .iter()
            .map(|(label, count)| format!("{count} {label}"))
            .collect();
        if !stats.is_empty() {
            out.push_str(&format!("  {}\n", stats.join(", ")));
        }

        for (item, error) in &self.failures {
            out.push_str(&format!(
                "  {} {}: {}\n",
                Icon::Error.colored(supports_color, supports_unicode),
                item,
                ColoredText::dim(error.as_str()).render(supports_color)
            ));
        }

        if let Some(hint) = &self.next_step {
            out.push_str(&format!(
                "  {} {}\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                hint
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_summary_lists_stats() {
        let mut summary = ResultSummary::success("Build Complete");
        summary.add_stat("built", 3);
        summary.add_stat("skipped", 0);

        let rendered = summary.render(false, false);
        assert!(rendered.contains("[OK] Build Complete"));
        assert!(rendered.contains("3 built, 0 skipped"));
    }

    #[test]
    fn partial_summary_lists_failures_and_hint() {
        let mut summary = ResultSummary::partial("Publish Results");
        summary.add_failure("acme::card::1.0.0", "connection refused");
        summary.with_next_step("Is the registry running?");

        let rendered = summary.render(false, false);
        assert!(rendered.contains("[WARN] Publish Results"));
        assert!(rendered.contains("[FAIL] acme::card::1.0.0: connection refused"));
        assert!(rendered.contains("[>] Is the registry running?"));
    }
}
