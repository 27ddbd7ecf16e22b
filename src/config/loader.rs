//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::runtime::RuntimeMode;

use super::types::Config;

/// Project config file name, looked up in the input directory
pub const PROJECT_CONFIG_FILE: &str = "fractal.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Project config, else user config, else defaults. Environment overrides
/// are applied last.
pub fn discover(project_root: Option<&Path>) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_path());

    for path in candidates {
        if path.is_file() {
            let (config, warnings) = load_with_warnings(&path)?;
            tracing::debug!(path = %path.display(), "loaded config");
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// `~/.config/fractal/config.toml` (honours `XDG_CONFIG_HOME`)
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("fractal/config.toml"))
}

/// Apply environment variable overrides (FRACTAL_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`.
pub fn with_overrides_from(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    // FRACTAL_REGISTRY_URL
    if let Some(url) = lookup("FRACTAL_REGISTRY_URL").filter(|v| !v.is_empty()) {
        config.registry.url = Some(url);
    }

    // FRACTAL_ESBUILD
    if let Some(esbuild) = lookup("FRACTAL_ESBUILD").filter(|v| !v.is_empty()) {
        config.bundler.esbuild = PathBuf::from(esbuild);
    }

    // FRACTAL_STORAGE
    if let Some(storage) = lookup("FRACTAL_STORAGE").filter(|v| !v.is_empty()) {
        config.server.storage = PathBuf::from(storage);
    }

    // FRACTAL_PORT, then PORT
    let port = lookup("FRACTAL_PORT")
        .or_else(|| lookup("PORT"))
        .and_then(|p| p.trim().parse::<u16>().ok());
    if let Some(port) = port {
        config.server.port = port;
    }

    // FRACTAL_JOBS
    if let Some(jobs) = lookup("FRACTAL_JOBS").and_then(|j| j.trim().parse::<usize>().ok()) {
        config.build.jobs = jobs.max(1);
    }

    // FRACTAL_MODE
    if let Some(mode) = lookup("FRACTAL_MODE") {
        config.runtime.mode = RuntimeMode::parse(&mode);
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "build",
        "output",
        "extensions",
        "exclude",
        "jobs",
        "register_module",
        "externals",
        "bundler",
        "esbuild",
        "target",
        "server_target",
        "registry",
        "url",
        "server",
        "host",
        "port",
        "storage",
        "public_url",
        "max_body_bytes",
        "runtime",
        "mode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
