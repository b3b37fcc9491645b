//! Test browser handles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::mpsc;

use reloadwatch::errors::Result;
use reloadwatch::host::{Browser, RefreshFuture};

/// Counts refreshes and reports each one on a channel.
#[derive(Debug)]
pub struct RecordingBrowser {
    name: String,
    refreshes: AtomicUsize,
    fail: bool,
    tx: mpsc::UnboundedSender<String>,
}

impl RecordingBrowser {
    /// A browser whose refreshes succeed; each refresh sends `name` on the
    /// returned receiver.
    pub fn new(name: &str) -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        Self::build(name, false)
    }

    /// A browser whose refreshes always fail (after being recorded).
    pub fn failing(name: &str) -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        Self::build(name, true)
    }

    fn build(name: &str, fail: bool) -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let browser = Arc::new(Self {
            name: name.to_string(),
            refreshes: AtomicUsize::new(0),
            fail,
            tx,
        });
        (browser, rx)
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl Browser for RecordingBrowser {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn refresh(&self) -> RefreshFuture<'_> {
        Box::pin(async move {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            let _ = self.tx.send(self.name.clone());
            let result: Result<()> = if self.fail {
                Err(anyhow!("browser '{}' is unreachable", self.name).into())
            } else {
                Ok(())
            };
            result
        })
    }
}
