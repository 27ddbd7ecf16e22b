//! Build metadata entity
//!
//! Written as `<safe-name>.meta.json` next to each artifact. The publish step
//! reads it back to recover the registry key and the original source.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    /// Artifact identity string
    pub name: String,
    pub original_path: PathBuf,
    pub package_name: String,
    pub package_version: String,
    pub package_path: PathBuf,
    pub manifest_path: PathBuf,
    /// Size of the bundled `.js` in bytes
    pub output_size: u64,
    pub build_time: DateTime<Utc>,
}
