//! Custom assertion macros for CLI tests.
//!
//! These macros provide descriptive failure messages to aid debugging.

use std::path::Path;

/// List all files in a directory recursively (for debugging)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files
}

/// Assert that the four build outputs for `safe` exist in `dir`.
///
/// # Example
/// ```ignore
/// assert_built!(env.project_path("dist/fractals"), BUTTON_SAFE);
/// ```
#[macro_export]
macro_rules! assert_built {
    ($dir:expr, $safe:expr) => {
        for suffix in [".js", ".js.map", ".manifest.json", ".meta.json"] {
            let path = $dir.join(format!("{}{}", $safe, suffix));
            assert!(
                path.is_file(),
                "Expected build output '{}', but it doesn't exist.\nFiles found:\n  {}",
                path.display(),
                $crate::common::list_all_files(&$dir).join("\n  ")
            );
        }
    };
}

/// Assert that command output contains `needle`, printing both streams
/// otherwise.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        assert!(
            $result.combined_output().contains($needle),
            "Expected output to contain '{}'.\nstdout:\n{}\nstderr:\n{}",
            $needle,
            $result.stdout,
            $result.stderr
        );
    };
}
