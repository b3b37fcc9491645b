//! Hand-driven watch backend.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedSender;

use reloadwatch::errors::Result;
use reloadwatch::watch::{WatchBackend, WatchMessage};

#[derive(Debug, Default)]
struct State {
    sink: Option<UnboundedSender<WatchMessage>>,
    watched: Vec<PathBuf>,
    unwatched: Vec<PathBuf>,
}

/// A `WatchBackend` whose events are injected by the test.
///
/// Clones share state: keep one clone in the test and hand the other to
/// the detector.
#[derive(Debug, Clone, Default)]
pub struct ManualBackend {
    state: Arc<Mutex<State>>,
}

impl ManualBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a raw change for `path`, as if the OS reported it.
    ///
    /// Delivery ignores whether the watch was released, mimicking
    /// notifications already buffered by the OS.
    pub fn emit(&self, path: impl Into<PathBuf>) {
        self.send(WatchMessage::Changed(path.into()));
    }

    pub fn emit_error(&self, msg: &str) {
        self.send(WatchMessage::Error(msg.to_string()));
    }

    fn send(&self, message: WatchMessage) {
        let state = self.state.lock().unwrap();
        if let Some(sink) = &state.sink {
            let _ = sink.send(message);
        }
    }

    pub fn watched_roots(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().watched.clone()
    }

    pub fn unwatched_roots(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().unwatched.clone()
    }
}

impl WatchBackend for ManualBackend {
    fn watch(&mut self, root: &Path, sink: UnboundedSender<WatchMessage>) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.sink = Some(sink);
        state.watched.push(root.to_path_buf());
        Ok(())
    }

    fn unwatch(&mut self, root: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.unwatched.push(root.to_path_buf());
        Ok(())
    }
}
