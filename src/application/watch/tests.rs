//! Tests for the watch module

use super::cache::ContentTracker;
use super::event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
use super::use_case::WatchUseCase;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

use crate::application::build::{BuildOptions, BuildUseCase};
use crate::domain::ports::{BundleError, BundleOutput, BundleRequest, Bundler, TransformRequest};
use crate::domain::value_objects::ContentHash;

struct CopyBundler;

impl Bundler for CopyBundler {
    fn bundle(&self, request: &BundleRequest) -> Result<BundleOutput, BundleError> {
        fs::copy(&request.entry, &request.outfile)?;
        Ok(BundleOutput {
            code_path: request.outfile.clone(),
            map_path: None,
        })
    }

    fn transform(&self, _request: &TransformRequest) -> Result<String, BundleError> {
        unreachable!()
    }
}

// === WatchEvent tests ===

#[test]
fn test_watch_event_to_json_started() {
    let event = WatchEvent::WatchStarted {
        input: "src".to_string(),
        output: "dist/fractals".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"watch_started\""));
    assert!(json.contains("\"input\":\"src\""));
    assert!(json.contains("\"command\":\"watch\""));
}

#[test]
fn test_watch_event_to_json_file_changed() {
    let event = WatchEvent::FileChanged {
        path: "src/Card.tsx".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"file_changed\""));
    assert!(json.contains("\"path\":\"src/Card.tsx\""));
}

#[test]
fn test_watch_event_to_json_build_complete() {
    let event = WatchEvent::BuildComplete {
        built: 5,
        skipped: 2,
        failed: 0,
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"build_complete\""));
    assert!(json.contains("\"built\":5"));
    assert!(json.contains("\"skipped\":2"));
    assert!(json.contains("\"failed\":0"));
}

#[test]
fn test_watch_event_to_json_error() {
    let event = WatchEvent::Error {
        message: "Something \"failed\"".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"error\""));
    assert!(json.contains("\\\"failed\\\""));
}

// === WatcherState tests ===

#[test]
fn test_watcher_state_debouncing() {
    let mut state = WatcherState::new();

    // No changes yet
    assert!(!state.should_sync());

    state.add_change(PathBuf::from("Card.tsx"));

    // Should not sync immediately (debounce)
    assert!(!state.should_sync());

    std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));
    assert!(state.should_sync());

    let changes = state.take_changes();
    assert_eq!(changes.len(), 1);

    // No more pending
    assert!(!state.should_sync());
    assert!(!state.has_pending());
}

#[test]
fn test_watcher_state_coalesce_changes() {
    let mut state = WatcherState::new();

    state.add_change(PathBuf::from("Card.tsx"));
    state.add_change(PathBuf::from("Card.tsx"));
    state.add_change(PathBuf::from("Card.tsx"));

    std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));

    let changes = state.take_changes();
    assert_eq!(changes.len(), 1);
}

#[test]
fn test_watcher_state_changes_are_sorted() {
    let mut state = WatcherState::new();

    state.add_change(PathBuf::from("c.tsx"));
    state.add_change(PathBuf::from("a.tsx"));
    state.add_change(PathBuf::from("b.tsx"));

    let changes = state.take_changes();
    assert_eq!(
        changes,
        vec![
            PathBuf::from("a.tsx"),
            PathBuf::from("b.tsx"),
            PathBuf::from("c.tsx")
        ]
    );
}

// === ContentTracker tests ===

#[test]
fn test_content_tracker_observe() {
    let mut tracker = ContentTracker::new();
    let path = Path::new("Card.tsx");
    assert!(tracker.is_empty());

    assert!(tracker.observe(path, ContentHash::from_content("a")));
    assert!(!tracker.observe(path, ContentHash::from_content("a")));
    assert!(tracker.observe(path, ContentHash::from_content("b")));
    assert_eq!(tracker.len(), 1);
}

#[test]
fn test_content_tracker_invalidate() {
    let mut tracker = ContentTracker::new();
    let path = Path::new("Card.tsx");
    let hash = ContentHash::from_content("x");

    tracker.update(path, hash.clone());
    assert!(!tracker.is_changed(path, &hash));

    tracker.invalidate(path);
    assert!(tracker.is_changed(path, &hash));
}

#[test]
fn test_content_tracker_seed_skips_missing_files() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("A.tsx");
    fs::write(&file, "\"use fractal\";").unwrap();

    let mut tracker = ContentTracker::new();
    let missing = dir.path().join("missing.tsx");
    tracker.seed([file.as_path(), missing.as_path()]);

    assert_eq!(tracker.len(), 1);
    assert!(!tracker.is_changed(&file, &ContentHash::from_content("\"use fractal\";")));
}

// === WatchUseCase tests ===

#[test]
fn test_watch_initial_build() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("package.json"), r#"{"name":"app","version":"1.0.0"}"#).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(
        root.join("src/Card.tsx"),
        "\"use fractal\";\nexport const Card = () => null;\n",
    )
    .unwrap();

    let options = WatchOptions::new(BuildOptions::new(root.join("src"), root.join("dist")));
    let events: Arc<Mutex<Vec<WatchEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    let running = Arc::new(AtomicBool::new(false)); // Stop immediately

    let use_case = WatchUseCase::new(BuildUseCase::new(Arc::new(CopyBundler)), options);
    use_case
        .start(running, |event| {
            events_clone.lock().unwrap().push(event);
        })
        .unwrap();

    let captured = events.lock().unwrap();
    assert!(matches!(captured[0], WatchEvent::WatchStarted { .. }));
    assert!(captured.contains(&WatchEvent::BuildComplete {
        built: 1,
        skipped: 0,
        failed: 0
    }));
    assert_eq!(captured.last(), Some(&WatchEvent::Shutdown));
    assert!(root.join("dist/app_card_1_0_0.js").exists());
}

#[test]
fn test_watch_missing_input_fails() {
    let dir = tempdir().unwrap();
    let options = WatchOptions::new(BuildOptions::new(
        dir.path().join("missing"),
        dir.path().join("dist"),
    ));
    let use_case = WatchUseCase::new(BuildUseCase::new(Arc::new(CopyBundler)), options);
    let result = use_case.start(Arc::new(AtomicBool::new(false)), |_| {});
    assert!(result.is_err());
}

#[test]
fn test_watch_options_builder() {
    let options = WatchOptions::new(BuildOptions::new("src", "dist")).with_json(true);
    assert!(options.json);
    assert_eq!(options.build.input, PathBuf::from("src"));
}
