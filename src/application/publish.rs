//! Publish use case
//!
//! Uploads built fractals to a registry. Each artifact is described by its
//! `<safe>.meta.json`: the registry key is the recorded identity, the body
//! is the original source plus the generated manifest. Best effort: every
//! artifact is attempted, failures are tallied, nothing is retried.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::{BuildMetadata, PublishReceipt, PublishRequest};
use crate::domain::ports::{
    BuildEvent, BuildEventSink, NoopEventSink, PublishError, RegistryPublisher,
};
use crate::domain::value_objects::{starts_with_directive, FractalId};
use crate::error::FractalResult;

const METADATA_SUFFIX: &str = ".meta.json";

/// One failed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUpload {
    /// Identity, or the metadata file name when it could not be read
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct PublishReport {
    pub published: Vec<PublishReceipt>,
    pub failed: Vec<FailedUpload>,
}

impl PublishReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct PublishUseCase {
    publisher: Arc<dyn RegistryPublisher>,
}

impl PublishUseCase {
    pub fn new(publisher: Arc<dyn RegistryPublisher>) -> Self {
        Self { publisher }
    }

    /// Build metadata files in `output_dir`, sorted by name.
    pub fn metadata_files(output_dir: &Path) -> FractalResult<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = fs::read_dir(output_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .is_some_and(|n| n.to_string_lossy().ends_with(METADATA_SUFFIX))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Publish every artifact found in a build output directory
    pub fn publish_dir(
        &self,
        output_dir: &Path,
        events: Arc<dyn BuildEventSink>,
    ) -> FractalResult<PublishReport> {
        let files = Self::metadata_files(output_dir)?;
        Ok(self.publish_artifacts(&files, events))
    }

    /// Publish the artifacts described by `metadata_files`
    pub fn publish_artifacts(
        &self,
        metadata_files: &[PathBuf],
        events: Arc<dyn BuildEventSink>,
    ) -> PublishReport {
        let mut report = PublishReport::default();
        for path in metadata_files {
            match self.publish_one(path) {
                Ok(receipt) => {
                    tracing::debug!(id = %receipt.id, "published");
                    events.on_event(BuildEvent::Published {
                        name: receipt.id.clone(),
                        registry: self.publisher.registry_url().to_string(),
                    });
                    report.published.push(receipt);
                }
                Err((name, e)) => {
                    tracing::warn!(%name, error = %e, "publish failed");
                    events.on_event(BuildEvent::PublishFailed {
                        name: name.clone(),
                        error: e.to_string(),
                    });
                    report.failed.push(FailedUpload {
                        name,
                        error: e.to_string(),
                    });
                }
            }
        }

        events.on_event(BuildEvent::PublishCompleted {
            published: report.published.len(),
            failed: report.failed.len(),
        });
        report
    }

    /// Publish without progress events
    pub fn publish_quiet(&self, metadata_files: &[PathBuf]) -> PublishReport {
        self.publish_artifacts(metadata_files, Arc::new(NoopEventSink))
    }

    fn publish_one(&self, metadata_path: &Path) -> Result<PublishReceipt, (String, PublishError)> {
        let fallback_name = metadata_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let metadata = read_metadata(metadata_path).map_err(|e| (fallback_name, e))?;
        let name = metadata.name.clone();

        let request = build_request(&metadata).map_err(|e| (name.clone(), e))?;
        let id = FractalId::new(metadata.name.clone()).map_err(|e| {
            (
                name.clone(),
                PublishError::Artifact {
                    path: metadata_path.to_path_buf(),
                    message: e.to_string(),
                },
            )
        })?;

        self.publisher
            .publish(&id, &request)
            .map_err(|e| (name, e))
    }
}

fn artifact_error(path: &Path, message: impl ToString) -> PublishError {
    PublishError::Artifact {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

fn read_metadata(path: &Path) -> Result<BuildMetadata, PublishError> {
    let content = fs::read_to_string(path).map_err(|e| artifact_error(path, e))?;
    serde_json::from_str(&content).map_err(|e| artifact_error(path, e))
}

/// Source from the original file; manifest when one was written.
fn build_request(metadata: &BuildMetadata) -> Result<PublishRequest, PublishError> {
    let source = fs::read_to_string(&metadata.original_path)
        .map_err(|e| artifact_error(&metadata.original_path, e))?;
    if !starts_with_directive(&source) {
        return Err(artifact_error(
            &metadata.original_path,
            "source no longer starts with the fractal directive",
        ));
    }

    let manifest = match fs::read_to_string(&metadata.manifest_path) {
        Ok(content) => Some(
            serde_json::from_str(&content)
                .map_err(|e| artifact_error(&metadata.manifest_path, e))?,
        ),
        Err(_) => None,
    };

    Ok(PublishRequest { source, manifest })
}
