//! Package entities
//!
//! `PackageInfo` is the owning-package identity used to name artifacts.
//! `PackageDescriptor` is the lenient view of a `package.json` the manifest
//! generator reads declared dependencies from.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Name and version of the package owning a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    /// Path to the `package.json` the info was read from
    pub descriptor_path: PathBuf,
}

impl PackageInfo {
    /// Directory containing the descriptor.
    pub fn root(&self) -> &Path {
        self.descriptor_path.parent().unwrap_or(Path::new(""))
    }
}

/// Parsed `package.json`
///
/// Every field is optional; non-string dependency versions are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: Option<String>,
    pub version: Option<String>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub peer_dependencies: BTreeMap<String, String>,
}

impl PackageDescriptor {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(content)?;
        Ok(Self {
            name: string_field(&value, "name"),
            version: string_field(&value, "version"),
            dependencies: string_map(&value, "dependencies"),
            dev_dependencies: string_map(&value, "devDependencies"),
            peer_dependencies: string_map(&value, "peerDependencies"),
        })
    }

    /// Package identity, when both name and version are present and non-empty.
    pub fn info(&self, descriptor_path: &Path) -> Option<PackageInfo> {
        match (&self.name, &self.version) {
            (Some(name), Some(version)) if !name.is_empty() && !version.is_empty() => {
                Some(PackageInfo {
                    name: name.clone(),
                    version: version.clone(),
                    descriptor_path: descriptor_path.to_path_buf(),
                })
            }
            _ => None,
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn string_map(value: &Value, key: &str) -> BTreeMap<String, String> {
    value
        .get(key)
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default()
}
