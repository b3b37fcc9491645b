#![allow(dead_code)]

use std::sync::Arc;

use tokio::sync::mpsc;

use reloadwatch::ChangeDetected;
use reloadwatch::watch::ChangeDetector;

pub use reloadwatch_test_utils::backend::ManualBackend;
pub use reloadwatch_test_utils::browsers::RecordingBrowser;
pub use reloadwatch_test_utils::builders::ConfigFileBuilder;
pub use reloadwatch_test_utils::{init_tracing, with_timeout};

/// Subscribe a listener that forwards every notification to a channel.
pub fn notifications(detector: &ChangeDetector) -> mpsc::UnboundedReceiver<ChangeDetected> {
    let (tx, rx) = mpsc::unbounded_channel();
    detector.subscribe(move |ev| {
        let _ = tx.send(ev);
    });
    rx
}

/// Yield until the detector has processed at least `n` watched events.
pub async fn wait_for_watched(detector: &ChangeDetector, n: u64) {
    with_timeout(async {
        while detector.watched_count() < n {
            tokio::task::yield_now().await;
        }
    })
    .await
}

/// Drain whatever is currently queued on `rx`.
pub fn drain<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> usize {
    let mut n = 0;
    while rx.try_recv().is_ok() {
        n += 1;
    }
    n
}

/// Give spawned tasks a chance to run.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

pub fn as_browser(b: &Arc<RecordingBrowser>) -> Arc<dyn reloadwatch::host::Browser> {
    Arc::clone(b) as Arc<dyn reloadwatch::host::Browser>
}
