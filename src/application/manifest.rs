//! Manifest generation
//!
//! Every analysis is best effort: an unreadable source, an invalid
//! `package.json` or a missing repository each degrade to an empty section
//! instead of failing the build.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{
    DependencySet, FractalManifest, PackageDescriptor, PackageInfo, ParentApplication,
    SourceLocation,
};
use crate::domain::ports::SourceClassifier;
use crate::domain::services::{filter_declared, find_internal_references, referenced_packages, ImportedComponent};
use crate::domain::value_objects::ArtifactIdentity;
use crate::error::FractalResult;
use crate::infrastructure::{DirectiveClassifier, GitInfoExtractor};

const COMPONENT_EXTENSIONS: &[&str] = &["tsx", "jsx"];

pub struct ManifestGenerator {
    classifier: Arc<dyn SourceClassifier>,
    git: GitInfoExtractor,
}

impl Default for ManifestGenerator {
    fn default() -> Self {
        Self::new(Arc::new(DirectiveClassifier), GitInfoExtractor::new())
    }
}

impl ManifestGenerator {
    pub fn new(classifier: Arc<dyn SourceClassifier>, git: GitInfoExtractor) -> Self {
        Self { classifier, git }
    }

    /// Output path of the manifest for `identity`.
    pub fn manifest_path(identity: &ArtifactIdentity, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.manifest.json", identity.safe_file_name()))
    }

    /// Build the manifest record without writing it.
    pub fn build_manifest(
        &self,
        identity: &ArtifactIdentity,
        source_path: &Path,
        package: &PackageInfo,
    ) -> FractalManifest {
        let source = match fs::read_to_string(source_path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(path = %source_path.display(), error = %e, "manifest: unreadable source");
                String::new()
            }
        };

        let source_dir = source_path.parent().unwrap_or(Path::new("."));
        let internal = find_internal_references(&source, |component| {
            resolve_component(source_dir, component)
                .is_some_and(|path| self.classifier.is_fractal(&path))
        });

        let relative_path = source_path
            .strip_prefix(package.root())
            .unwrap_or(source_path)
            .display()
            .to_string();

        FractalManifest {
            name: identity.to_string(),
            version: package.version.clone(),
            generation_date: Utc::now(),
            dependencies: used_dependencies(&source, package),
            internal_fractal_references: internal,
            repository: self.git.extract(source_path),
            parent_application: ParentApplication {
                name: package.name.clone(),
                version: package.version.clone(),
                path: package.descriptor_path.display().to_string(),
            },
            source: SourceLocation {
                file_path: source_path.display().to_string(),
                relative_path,
            },
        }
    }

    /// Write `<safe>.manifest.json` into `output_dir` and return its path.
    pub fn generate_manifest(
        &self,
        identity: &ArtifactIdentity,
        source_path: &Path,
        package: &PackageInfo,
        output_dir: &Path,
    ) -> FractalResult<PathBuf> {
        let manifest = self.build_manifest(identity, source_path, package);
        let path = Self::manifest_path(identity, output_dir);
        fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
        tracing::debug!(path = %path.display(), "manifest written");
        Ok(path)
    }
}

fn used_dependencies(source: &str, package: &PackageInfo) -> DependencySet {
    let descriptor = fs::read_to_string(&package.descriptor_path)
        .ok()
        .and_then(|content| PackageDescriptor::parse(&content).ok());
    match descriptor {
        Some(descriptor) => filter_declared(&descriptor, &referenced_packages(source)),
        None => {
            tracing::warn!(
                path = %package.descriptor_path.display(),
                "manifest: package.json unreadable, dependencies left empty"
            );
            DependencySet::default()
        }
    }
}

/// First existing file an imported component may live in.
fn resolve_component(source_dir: &Path, component: &ImportedComponent) -> Option<PathBuf> {
    let name = &component.local;
    let mut candidates = Vec::new();
    for ext in COMPONENT_EXTENSIONS {
        candidates.push(source_dir.join(format!("{name}.{ext}")));
        candidates.push(source_dir.join(name).join(format!("index.{ext}")));
        candidates.push(source_dir.join("components").join(format!("{name}.{ext}")));
    }
    if component.specifier.starts_with('.') {
        let base = source_dir.join(&component.specifier);
        candidates.push(base.clone());
        for ext in COMPONENT_EXTENSIONS {
            let mut with_ext = base.clone().into_os_string();
            with_ext.push(format!(".{ext}"));
            candidates.push(PathBuf::from(with_ext));
            candidates.push(base.join(format!("index.{ext}")));
        }
    }
    candidates.into_iter().find(|p| p.is_file())
}
