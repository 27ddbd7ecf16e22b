//! Fractal manifest entity
//!
//! Provenance record written beside every built artifact as
//! `<safe-name>.manifest.json`. Superseded wholesale by the next build.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FractalManifest {
    pub name: String,
    pub version: String,
    pub generation_date: DateTime<Utc>,
    pub dependencies: DependencySet,
    #[serde(alias = "internalFractals", default)]
    pub internal_fractal_references: Vec<String>,
    #[serde(default)]
    pub repository: RepositoryInfo,
    pub parent_application: ParentApplication,
    pub source: SourceLocation,
}

/// Declared dependencies that the source actually references
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySet {
    #[serde(default)]
    pub production: BTreeMap<String, String>,
    #[serde(default)]
    pub development: BTreeMap<String, String>,
    #[serde(default)]
    pub peer: BTreeMap<String, String>,
}

impl DependencySet {
    pub fn is_empty(&self) -> bool {
        self.production.is_empty() && self.development.is_empty() && self.peer.is_empty()
    }
}

/// Version control coordinates; every field is best effort
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dirty: Option<bool>,
}

/// Package owning the fractal source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentApplication {
    pub name: String,
    pub version: String,
    /// Path of the owning `package.json`
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub file_path: String,
    /// Path relative to the package root
    pub relative_path: String,
}
