// src/watch/watcher.rs

//! Recursive directory watch capability.
//!
//! The detector only needs three things from the platform: register a root,
//! receive changed paths, and tear the registration down. [`WatchBackend`]
//! captures exactly that; [`NotifyBackend`] satisfies it with whatever
//! `notify::RecommendedWatcher` picks for the target OS.

use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::errors::Result;

/// Messages delivered by a backend to the detector task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchMessage {
    /// Something happened at this path. The kind of change is deliberately
    /// not reported.
    Changed(PathBuf),
    /// The backend hit an error after registration.
    Error(String),
}

/// Trait abstracting how a directory tree is watched.
///
/// Production code uses [`NotifyBackend`]; tests can provide their own
/// implementation that injects paths by hand.
pub trait WatchBackend: Send {
    /// Start watching `root` recursively, delivering messages to `sink`.
    fn watch(&mut self, root: &Path, sink: UnboundedSender<WatchMessage>) -> Result<()>;

    /// Release the watch on `root`. No messages may be produced afterwards.
    fn unwatch(&mut self, root: &Path) -> Result<()>;
}

/// `notify`-based backend.
///
/// Holds the underlying `RecommendedWatcher` only while a watch is active.
#[derive(Default)]
pub struct NotifyBackend {
    inner: Option<RecommendedWatcher>,
}

impl std::fmt::Debug for NotifyBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyBackend")
            .field("active", &self.inner.is_some())
            .finish()
    }
}

impl NotifyBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WatchBackend for NotifyBackend {
    fn watch(&mut self, root: &Path, sink: UnboundedSender<WatchMessage>) -> Result<()> {
        // Closure called synchronously by notify whenever an event arrives.
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let messages: Vec<WatchMessage> = match res {
                    Ok(event) => event.paths.into_iter().map(WatchMessage::Changed).collect(),
                    Err(err) => vec![WatchMessage::Error(err.to_string())],
                };
                for message in messages {
                    // The receiver is gone once the detector is closed.
                    if sink.send(message).is_err() {
                        break;
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(root, RecursiveMode::Recursive)?;
        info!("file watcher started on {:?}", root);

        self.inner = Some(watcher);
        Ok(())
    }

    fn unwatch(&mut self, root: &Path) -> Result<()> {
        let Some(mut watcher) = self.inner.take() else {
            return Ok(());
        };
        let result = watcher.unwatch(root);
        drop(watcher);
        info!("file watcher released on {:?}", root);
        result.map_err(Into::into)
    }
}
