mod common;
use crate::common::{
    drain, init_tracing, notifications, settle, wait_for_watched, with_timeout, ManualBackend,
};

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reloadwatch::errors::ReloadError;
use reloadwatch::watch::{default_patterns, ChangeDetector, DetectorOptions, DEFAULT_IGNORE_GLOBS};

type TestResult = Result<(), Box<dyn Error>>;

fn proj_detector(backend: &ManualBackend) -> Result<ChangeDetector, ReloadError> {
    let patterns = vec!["/proj/node_modules".to_string(), "/proj/build".to_string()];
    ChangeDetector::with_backend("/proj", patterns, DetectorOptions::default(), backend.clone())
}

#[tokio::test(start_paused = true)]
async fn project_scenario_fires_twice() -> TestResult {
    init_tracing();

    let backend = ManualBackend::new();
    let detector = proj_detector(&backend)?;
    let mut rx = notifications(&detector);

    backend.emit("/proj/node_modules/x.js");
    backend.emit("/proj/build/y.js");
    backend.emit("/proj/src/z.js");
    with_timeout(rx.recv()).await.ok_or("first notification")?;
    assert_eq!(detector.watched_count(), 1);

    tokio::time::advance(Duration::from_millis(100)).await;
    backend.emit("/proj/src/w.js");
    wait_for_watched(&detector, 2).await;
    assert_eq!(drain(&mut rx), 0);

    tokio::time::advance(Duration::from_millis(200)).await;
    backend.emit("/proj/src/v.js");
    with_timeout(rx.recv()).await.ok_or("second notification")?;
    assert_eq!(drain(&mut rx), 0);
    assert_eq!(detector.watched_count(), 3);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn ignored_events_do_not_consume_the_window() -> TestResult {
    init_tracing();

    let backend = ManualBackend::new();
    let detector = proj_detector(&backend)?;
    let mut rx = notifications(&detector);

    for i in 0..10 {
        backend.emit(format!("/proj/node_modules/pkg/{i}.js"));
        backend.emit(format!("/proj/src/.swap{i}"));
    }
    backend.emit("/proj/.git/index");
    backend.emit("/proj/src/main.js");

    wait_for_watched(&detector, 1).await;
    settle().await;
    assert_eq!(drain(&mut rx), 1);
    assert_eq!(detector.watched_count(), 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn sustained_activity_fires_once_per_window() -> TestResult {
    init_tracing();

    let backend = ManualBackend::new();
    let detector = proj_detector(&backend)?;
    let mut rx = notifications(&detector);

    for i in 0..=20u64 {
        backend.emit(format!("/proj/src/file{i}.js"));
        wait_for_watched(&detector, i + 1).await;
        tokio::time::advance(Duration::from_millis(50)).await;
    }
    settle().await;

    assert_eq!(drain(&mut rx), 5);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn creating_or_removing_a_default_ignored_directory_is_silent() -> TestResult {
    init_tracing();

    let backend = ManualBackend::new();
    let patterns = default_patterns(Path::new("/proj"), DEFAULT_IGNORE_GLOBS);
    let detector =
        ChangeDetector::with_backend("/proj", patterns, DetectorOptions::default(), backend.clone())?;
    let mut rx = notifications(&detector);

    backend.emit("/proj/node_modules");
    backend.emit("/proj/node_modules/pkg/index.js");
    backend.emit("/proj/bower_components");
    backend.emit("/proj/src/app.js");

    wait_for_watched(&detector, 1).await;
    settle().await;
    assert_eq!(drain(&mut rx), 1);
    assert_eq!(detector.watched_count(), 1);

    Ok(())
}

#[tokio::test]
async fn relative_base_dir_is_made_absolute() -> TestResult {
    init_tracing();

    let cwd = std::env::current_dir()?;
    let backend = ManualBackend::new();
    let detector =
        ChangeDetector::with_backend(".", Vec::new(), DetectorOptions::default(), backend.clone())?;
    let mut rx = notifications(&detector);

    assert!(detector.base_dir().is_absolute());
    assert_eq!(detector.base_dir(), cwd.as_path());
    assert_eq!(backend.watched_roots(), vec![cwd.join(".")]);

    // Never existed, so only a lexical prefix match can relativize it.
    backend.emit(cwd.join("no-such-dir/deleted.js"));
    with_timeout(rx.recv()).await.ok_or("notification for deleted file")?;
    assert_eq!(detector.watched_count(), 1);

    Ok(())
}

#[tokio::test]
async fn close_discards_buffered_events() -> TestResult {
    init_tracing();

    let backend = ManualBackend::new();
    let mut detector = proj_detector(&backend)?;
    let mut rx = notifications(&detector);

    // Queued but not yet processed when close() runs.
    backend.emit("/proj/src/z.js");
    detector.close();
    backend.emit("/proj/src/w.js");
    settle().await;

    assert!(detector.is_closed());
    assert_eq!(drain(&mut rx), 0);
    assert_eq!(backend.watched_roots(), vec![PathBuf::from("/proj")]);
    assert_eq!(backend.unwatched_roots(), vec![PathBuf::from("/proj")]);

    Ok(())
}

#[tokio::test]
async fn close_is_idempotent_and_runs_on_drop() -> TestResult {
    let backend = ManualBackend::new();
    let mut detector = proj_detector(&backend)?;

    detector.close();
    detector.close();
    drop(detector);
    assert_eq!(backend.unwatched_roots().len(), 1);

    let backend = ManualBackend::new();
    drop(proj_detector(&backend)?);
    assert_eq!(backend.unwatched_roots(), vec![PathBuf::from("/proj")]);

    Ok(())
}

#[tokio::test]
async fn no_notification_after_close_following_delivery() -> TestResult {
    let backend = ManualBackend::new();
    let mut detector = proj_detector(&backend)?;
    let mut rx = notifications(&detector);

    backend.emit("/proj/src/a.js");
    with_timeout(rx.recv()).await.ok_or("notification before close")?;

    detector.close();
    tokio::time::sleep(Duration::from_millis(250)).await;
    backend.emit("/proj/src/b.js");
    settle().await;

    assert_eq!(drain(&mut rx), 0);
    Ok(())
}

#[tokio::test]
async fn unsubscribed_listeners_are_not_called() -> TestResult {
    let backend = ManualBackend::new();
    let detector = proj_detector(&backend)?;

    let removed_calls = Arc::new(AtomicUsize::new(0));
    let removed = {
        let calls = Arc::clone(&removed_calls);
        detector.subscribe(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };
    let mut rx = notifications(&detector);

    assert!(detector.unsubscribe(removed));
    assert!(!detector.unsubscribe(removed));

    backend.emit("/proj/src/a.js");
    with_timeout(rx.recv()).await.ok_or("remaining listener notified")?;
    assert_eq!(removed_calls.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test]
async fn backend_errors_do_not_stop_the_detector() -> TestResult {
    init_tracing();

    let backend = ManualBackend::new();
    let detector = proj_detector(&backend)?;
    let mut rx = notifications(&detector);

    backend.emit_error("inotify queue overflow");
    backend.emit("/proj/src/a.js");
    with_timeout(rx.recv()).await.ok_or("notification after error")?;
    assert!(!detector.is_closed());

    Ok(())
}

#[test]
fn construction_outside_a_runtime_fails() {
    let backend = ManualBackend::new();
    match proj_detector(&backend) {
        Err(ReloadError::Other(e)) => assert!(e.to_string().contains("Tokio runtime")),
        other => panic!("expected runtime error, got {:?}", other),
    }
    assert!(backend.watched_roots().is_empty());
}
