//! Build Use Case
//!
//! Orchestrates one build run:
//! 1. Detect directive-bearing sources
//! 2. Resolve the owning package and the artifact identity
//! 3. Transform, then bundle from a temporary entry beside the source
//! 4. Write the manifest and build metadata
//!
//! Every candidate is independent. A failing candidate is recorded and the
//! run continues.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::domain::entities::{BuildMetadata, DetectedArtifact, PackageInfo};
use crate::domain::ports::{
    BuildEvent, BuildEventSink, BundleRequest, Bundler, ModuleFormat, NoopEventSink,
    PackageResolver, Platform,
};
use crate::domain::services::Transformer;
use crate::error::{FractalError, FractalResult};
use crate::infrastructure::{FractalDetector, FsPackageResolver};

use super::super::manifest::ManifestGenerator;
use super::options::BuildOptions;
use super::result::{BuildOutcome, BuildReport, BuiltFractal, FailedFractal, SkippedFractal};

/// Build use case
pub struct BuildUseCase {
    bundler: Arc<dyn Bundler>,
    resolver: Arc<dyn PackageResolver>,
    manifests: ManifestGenerator,
}

impl BuildUseCase {
    pub fn new(bundler: Arc<dyn Bundler>) -> Self {
        Self {
            bundler,
            resolver: Arc::new(FsPackageResolver::new()),
            manifests: ManifestGenerator::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn PackageResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_manifest_generator(mut self, manifests: ManifestGenerator) -> Self {
        self.manifests = manifests;
        self
    }

    /// Build every detected candidate
    pub fn build(&self, options: &BuildOptions) -> FractalResult<BuildReport> {
        self.build_with_events(options, Arc::new(NoopEventSink))
    }

    /// Build every detected candidate, reporting progress to `events`
    pub fn build_with_events(
        &self,
        options: &BuildOptions,
        events: Arc<dyn BuildEventSink>,
    ) -> FractalResult<BuildReport> {
        let detector = FractalDetector::new()
            .with_extensions(&options.extensions)
            .with_excluded(&options.exclude);
        let candidates = detector.find_fractals(&options.input)?;

        events.on_event(BuildEvent::Started {
            input: options.input.clone(),
            candidate_count: candidates.len(),
        });

        let mut report = BuildReport::new();
        if candidates.is_empty() {
            tracing::info!(input = %options.input.display(), "no fractal sources found");
            events.on_event(BuildEvent::Completed {
                built: 0,
                skipped: 0,
                failed: 0,
            });
            return Ok(report);
        }

        fs::create_dir_all(&options.output)?;

        let outcomes = self.run_all(&candidates, options, events.as_ref());
        for outcome in outcomes {
            report.push(outcome);
        }

        events.on_event(BuildEvent::Completed {
            built: report.built.len(),
            skipped: report.skipped.len(),
            failed: report.failed.len(),
        });
        Ok(report)
    }

    /// Run candidates on `options.jobs` workers; outcomes keep detection order.
    fn run_all(
        &self,
        candidates: &[DetectedArtifact],
        options: &BuildOptions,
        events: &dyn BuildEventSink,
    ) -> Vec<BuildOutcome> {
        let jobs = options.jobs.clamp(1, candidates.len());
        if jobs == 1 {
            return candidates
                .iter()
                .enumerate()
                .map(|(index, c)| self.build_indexed(index, c.path(), options, events))
                .collect();
        }

        let next = AtomicUsize::new(0);
        let slots: Mutex<Vec<Option<BuildOutcome>>> = Mutex::new(vec![None; candidates.len()]);
        std::thread::scope(|scope| {
            for _ in 0..jobs {
                scope.spawn(|| loop {
                    let index = next.fetch_add(1, Ordering::SeqCst);
                    let Some(candidate) = candidates.get(index) else {
                        break;
                    };
                    let outcome = self.build_indexed(index, candidate.path(), options, events);
                    if let Ok(mut slots) = slots.lock() {
                        slots[index] = Some(outcome);
                    }
                });
            }
        });

        slots
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .into_iter()
            .zip(candidates)
            .map(|(slot, candidate)| {
                slot.unwrap_or_else(|| {
                    BuildOutcome::Failed(FailedFractal {
                        source: candidate.file_path.clone(),
                        error: "build worker stopped before finishing".to_string(),
                    })
                })
            })
            .collect()
    }

    fn build_indexed(
        &self,
        index: usize,
        path: &Path,
        options: &BuildOptions,
        events: &dyn BuildEventSink,
    ) -> BuildOutcome {
        let outcome = self.build_file(path, options);
        match &outcome {
            BuildOutcome::Built(built) => {
                tracing::debug!(name = %built.identity, "built");
                events.on_event(BuildEvent::ItemBuilt {
                    index,
                    path: built.source.clone(),
                    name: built.identity.to_string(),
                    output: built.output.clone(),
                    size: built.size,
                });
            }
            BuildOutcome::Skipped(skipped) => {
                tracing::warn!(path = %skipped.source.display(), reason = %skipped.reason, "skipped");
                events.on_event(BuildEvent::ItemSkipped {
                    index,
                    path: skipped.source.clone(),
                    reason: skipped.reason.clone(),
                });
            }
            BuildOutcome::Failed(failed) => {
                tracing::warn!(path = %failed.source.display(), error = %failed.error, "build failed");
                events.on_event(BuildEvent::ItemFailed {
                    index,
                    path: failed.source.clone(),
                    error: failed.error.clone(),
                });
            }
        }
        outcome
    }

    /// Single-file pipeline. Failures are folded into the outcome.
    pub fn build_file(&self, path: &Path, options: &BuildOptions) -> BuildOutcome {
        let Some(package) = self.resolver.find_closest_package(path) else {
            return BuildOutcome::Skipped(SkippedFractal {
                source: path.to_path_buf(),
                reason: FractalError::PackageNotFound {
                    file: path.to_path_buf(),
                }
                .to_string(),
            });
        };

        match self.build_with_package(path, &package, options) {
            Ok(built) => BuildOutcome::Built(built),
            Err(e) => BuildOutcome::Failed(FailedFractal {
                source: path.to_path_buf(),
                error: e.to_string(),
            }),
        }
    }

    fn build_with_package(
        &self,
        path: &Path,
        package: &PackageInfo,
        options: &BuildOptions,
    ) -> FractalResult<BuiltFractal> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let identity = self.resolver.generate_fractal_name(package, &file_name);
        let safe = identity.safe_file_name();

        let transformed = Transformer::new(options.register_module.clone())
            .transform_file(path, &identity.to_string())?;

        let outfile = options.output.join(format!("{safe}.js"));
        {
            // temporary entry beside the source so relative imports resolve;
            // removed when dropped, on success and failure alike
            let extension = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_else(|| ".tsx".to_string());
            let mut entry = tempfile::Builder::new()
                .prefix(".temp-")
                .suffix(&extension)
                .tempfile_in(source_dir(path))?;
            entry.write_all(transformed.code.as_bytes())?;
            entry.flush()?;

            self.bundler.bundle(&BundleRequest {
                entry: entry.path().to_path_buf(),
                outfile: outfile.clone(),
                format: ModuleFormat::Esm,
                platform: Platform::Browser,
                target: options.target.clone(),
                externals: options.externals.clone(),
                minify: true,
                sourcemap: true,
            })?;
        }

        let manifest =
            self.manifests
                .generate_manifest(&identity, path, package, &options.output)?;
        let size = fs::metadata(&outfile)?.len();

        let metadata = BuildMetadata {
            name: identity.to_string(),
            original_path: path.to_path_buf(),
            package_name: package.name.clone(),
            package_version: package.version.clone(),
            package_path: package.descriptor_path.clone(),
            manifest_path: manifest.clone(),
            output_size: size,
            build_time: Utc::now(),
        };
        let metadata_path = options.output.join(format!("{safe}.meta.json"));
        fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)?;

        Ok(BuiltFractal {
            source: path.to_path_buf(),
            identity,
            output: outfile,
            manifest,
            metadata: metadata_path,
            size,
        })
    }
}

fn source_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
