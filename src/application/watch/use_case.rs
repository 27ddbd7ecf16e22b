//! Watch Use Case implementation

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::build::{BuildOutcome, BuildUseCase};
use crate::domain::ports::{NoopEventSink, SourceClassifier};
use crate::domain::value_objects::ContentHash;
use crate::error::{FractalError, FractalResult};
use crate::infrastructure::{DirectiveClassifier, FractalDetector};

use super::cache::ContentTracker;
use super::event::{WatchEvent, WatchOptions, WatcherState};

/// Watch Use Case
///
/// Orchestrates continuous file watching with rebuilds.
/// This is the engine behind `fractal build --watch`.
pub struct WatchUseCase {
    build: BuildUseCase,
    options: WatchOptions,
    detector: FractalDetector<DirectiveClassifier>,
}

impl WatchUseCase {
    pub fn new(build: BuildUseCase, options: WatchOptions) -> Self {
        let detector = FractalDetector::new()
            .with_extensions(&options.build.extensions)
            .with_excluded(&options.build.exclude);
        Self {
            build,
            options,
            detector,
        }
    }

    /// Start watching (blocking)
    ///
    /// This method blocks until the running flag is set to false.
    /// Use the callback to receive events.
    pub fn start<F>(&self, running: Arc<AtomicBool>, on_event: F) -> FractalResult<()>
    where
        F: Fn(WatchEvent),
    {
        let input = self
            .options
            .build
            .input
            .canonicalize()
            .map_err(|_| FractalError::DirectoryNotFound {
                path: self.options.build.input.clone(),
            })?;

        on_event(WatchEvent::WatchStarted {
            input: input.display().to_string(),
            output: self.options.build.output.display().to_string(),
        });

        // Initial full build; its candidates seed the content tracker
        let mut tracker = ContentTracker::new();
        self.initial_build(&input, &mut tracker, &on_event)?;

        // Set up file watcher
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                        for path in event.paths {
                            let _ = tx.send(path);
                        }
                    }
                }
            },
            Config::default(),
        )
        .map_err(|e| FractalError::Watch(e.to_string()))?;

        watcher
            .watch(&input, RecursiveMode::Recursive)
            .map_err(|e| FractalError::Watch(e.to_string()))?;

        let mut state = WatcherState::new();

        // Startup cooldown: notify sometimes reports existing files right
        // after registration
        let cooldown_end = Instant::now() + Duration::from_millis(500);
        while Instant::now() < cooldown_end && running.load(Ordering::SeqCst) {
            let _ = rx.recv_timeout(Duration::from_millis(50));
        }

        while running.load(Ordering::SeqCst) {
            if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
                if let Some(path) = self.accept_change(&input, path, &mut tracker) {
                    state.add_change(path);
                }
            }

            if state.should_sync() {
                let changes = state.take_changes();
                for path in &changes {
                    on_event(WatchEvent::FileChanged {
                        path: path.display().to_string(),
                    });
                }
                self.rebuild(&changes, &on_event);
            }
        }

        on_event(WatchEvent::Shutdown);
        Ok(())
    }

    fn initial_build(
        &self,
        input: &Path,
        tracker: &mut ContentTracker,
        on_event: &impl Fn(WatchEvent),
    ) -> FractalResult<()> {
        on_event(WatchEvent::BuildStarted);
        let mut options = self.options.build.clone();
        options.input = input.to_path_buf();

        let report = match self.build.build_with_events(&options, Arc::new(NoopEventSink)) {
            Ok(report) => report,
            Err(e) => {
                on_event(WatchEvent::Error {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        tracker.seed(report.built.iter().map(|b| b.source.as_path()));
        tracker.seed(report.skipped.iter().map(|s| s.source.as_path()));
        tracker.seed(report.failed.iter().map(|f| f.source.as_path()));

        on_event(WatchEvent::BuildComplete {
            built: report.built.len(),
            skipped: report.skipped.len(),
            failed: report.failed.len(),
        });
        Ok(())
    }

    /// Filter one raw notification down to a real content change of a
    /// component source.
    fn accept_change(
        &self,
        input: &Path,
        path: PathBuf,
        tracker: &mut ContentTracker,
    ) -> Option<PathBuf> {
        let path = path.canonicalize().unwrap_or(path);
        let relative = path.strip_prefix(input).unwrap_or(&path);
        if !self.detector.is_candidate_path(relative) {
            return None;
        }
        let is_temp_entry = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with(".temp-"));
        if is_temp_entry {
            return None;
        }

        let hash = ContentHash::of_file(&path)?;
        tracker.observe(&path, hash).then_some(path)
    }

    /// Rebuild the changed fractal sources; errors become events.
    fn rebuild(&self, changes: &[PathBuf], on_event: &impl Fn(WatchEvent)) {
        on_event(WatchEvent::BuildStarted);
        if let Err(e) = std::fs::create_dir_all(&self.options.build.output) {
            on_event(WatchEvent::Error {
                message: e.to_string(),
            });
            return;
        }
        let (mut built, mut skipped, mut failed) = (0, 0, 0);

        for path in changes {
            if !self.detector.classifier().is_fractal(path) {
                tracing::debug!(path = %path.display(), "changed file is not a fractal");
                continue;
            }
            match self.build.build_file(path, &self.options.build) {
                BuildOutcome::Built(b) => {
                    built += 1;
                    on_event(WatchEvent::ItemBuilt {
                        path: b.source.display().to_string(),
                        name: b.identity.to_string(),
                    });
                }
                BuildOutcome::Skipped(s) => {
                    skipped += 1;
                    on_event(WatchEvent::ItemSkipped {
                        path: s.source.display().to_string(),
                        reason: s.reason,
                    });
                }
                BuildOutcome::Failed(f) => {
                    failed += 1;
                    on_event(WatchEvent::ItemFailed {
                        path: f.source.display().to_string(),
                        error: f.error,
                    });
                }
            }
        }

        on_event(WatchEvent::BuildComplete {
            built,
            skipped,
            failed,
        });
    }
}
