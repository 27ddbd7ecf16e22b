//! Terminal capability detection
//!
//! Progress goes to stdout and errors to stderr, so each stream is probed on
//! its own: `fractal build | tee log` still gets colored errors.

use is_terminal::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// What one output stream can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
    /// Running under GitHub Actions, which understands `::error` annotations
    pub github_actions: bool,
}

impl TerminalCapabilities {
    /// ASCII without color, as seen through a pipe
    pub fn plain() -> Self {
        Self {
            is_tty: false,
            supports_color: false,
            supports_unicode: false,
            is_ci: false,
            github_actions: false,
        }
    }
}

pub fn detect_capabilities() -> TerminalCapabilities {
    detect_for(Stream::Stdout)
}

pub fn detect_for(stream: Stream) -> TerminalCapabilities {
    let is_tty = match stream {
        Stream::Stdout => std::io::stdout().is_terminal(),
        Stream::Stderr => std::io::stderr().is_terminal(),
    };
    from_env(|key| std::env::var(key).ok(), is_tty)
}

fn from_env(get_env: impl Fn(&str) -> Option<String>, is_tty: bool) -> TerminalCapabilities {
    let flag = |key: &str| get_env(key).is_some_and(|v| !v.is_empty() && v != "0");

    let term = get_env("TERM").unwrap_or_default();
    let term_is_dumb = term.eq_ignore_ascii_case("dumb");

    // NO_COLOR beats FORCE_COLOR beats detection
    let supports_color = if flag("NO_COLOR") {
        false
    } else if flag("FORCE_COLOR") || flag("CLICOLOR_FORCE") {
        true
    } else {
        is_tty && !term_is_dumb
    };

    TerminalCapabilities {
        is_tty,
        supports_color,
        supports_unicode: !term_is_dumb && unicode_locale(&get_env),
        is_ci: ["CI", "GITHUB_ACTIONS", "BUILDKITE", "CIRCLECI", "GITLAB_CI", "JENKINS_HOME"]
            .iter()
            .any(|k| get_env(k).is_some()),
        github_actions: get_env("GITHUB_ACTIONS").is_some_and(|v| v == "true"),
    }
}

/// The first locale variable that is set decides; unset means UTF-8.
fn unicode_locale(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    let Some(locale) = ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .find_map(|k| get_env(k).filter(|v| !v.is_empty()))
    else {
        return true;
    };
    let locale = locale.to_lowercase();
    if locale.contains("utf-8") || locale.contains("utf8") {
        return true;
    }
    !matches!(locale.as_str(), "c" | "posix")
}
