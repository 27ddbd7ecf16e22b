//! Repository coordinates via the `git` executable
//!
//! Every query is best effort: a missing repository, a missing `git` binary
//! or a failing command leaves the corresponding field empty.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::entities::RepositoryInfo;

#[derive(Debug, Clone)]
pub struct GitInfoExtractor {
    program: PathBuf,
}

impl Default for GitInfoExtractor {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }
}

impl GitInfoExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Nearest ancestor of `start` (inclusive) containing `.git`.
    pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(".git").exists())
            .map(Path::to_path_buf)
    }

    /// Coordinates of the repository containing `path`.
    pub fn extract(&self, path: &Path) -> RepositoryInfo {
        let start = if path.is_dir() {
            path
        } else {
            path.parent().unwrap_or(path)
        };
        let Some(root) = Self::find_repo_root(start) else {
            return RepositoryInfo::default();
        };

        let url = self
            .run(&root, &["config", "--get", "remote.origin.url"])
            .map(|u| normalize_remote_url(&u));
        let branch = self.run(&root, &["rev-parse", "--abbrev-ref", "HEAD"]);
        let commit = self.run(&root, &["rev-parse", "HEAD"]);
        let dirty = self
            .run_allow_empty(&root, &["status", "--porcelain"])
            .map(|out| !out.trim().is_empty());

        RepositoryInfo {
            url,
            branch,
            commit,
            dirty: Some(dirty.unwrap_or(false)),
        }
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Option<String> {
        self.run_allow_empty(dir, args)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn run_allow_empty(&self, dir: &Path, args: &[&str]) -> Option<String> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| tracing::debug!(error = %e, "git unavailable"))
            .ok()?;

        if !output.status.success() {
            tracing::debug!(
                args = ?args,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git query failed"
            );
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// `git@host:org/repo.git` -> `https://host/org/repo`; trailing `.git` removed.
pub fn normalize_remote_url(url: &str) -> String {
    let url = url.trim();
    let url = match url.strip_prefix("git@") {
        Some(rest) => match rest.split_once(':') {
            Some((host, path)) => format!("https://{}/{}", host, path),
            None => url.to_string(),
        },
        None => url.to_string(),
    };
    match url.strip_suffix(".git") {
        Some(stripped) => stripped.to_string(),
        None => url,
    }
}
