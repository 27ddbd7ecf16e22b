#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Warning,
    Error,
}

/// GitHub Actions workflow command (`::error file=...::message`)
pub fn github_actions_annotation(
    level: AnnotationLevel,
    message: &str,
    file: Option<&str>,
    line: Option<usize>,
    title: Option<&str>,
) -> String {
    let level = match level {
        AnnotationLevel::Warning => "warning",
        AnnotationLevel::Error => "error",
    };

    let props: Vec<String> = [
        file.map(|f| format!("file={}", escape(f))),
        line.map(|l| format!("line={l}")),
        title.map(|t| format!("title={}", escape(t))),
    ]
    .into_iter()
    .flatten()
    .collect();

    if props.is_empty() {
        format!("::{level}::{}", escape(message))
    } else {
        format!("::{level} {}::{}", props.join(","), escape(message))
    }
}

fn escape(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}
