// src/watch/detector.rs

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::anyhow;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::errors::Result;
use crate::types::{ChangeDetected, SubscriptionId};
use crate::watch::IgnorePattern;
use crate::watch::debounce::DEFAULT_DEBOUNCE;
use crate::watch::path_utils::absolute;
use crate::watch::report::DEFAULT_REPORT_INTERVAL;
use crate::watch::session::{Observation, WatchSession};
use crate::watch::watcher::{NotifyBackend, WatchBackend, WatchMessage};

/// Callback invoked for every change notification.
pub type Listener = Arc<dyn Fn(ChangeDetected) + Send + Sync>;

/// Tunables for a [`ChangeDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorOptions {
    /// Minimum time between two notifications.
    pub debounce: Duration,
    /// Quiet period before the watched-file count is logged.
    pub report_interval: Duration,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// State shared between the detector handle and its event task.
#[derive(Default)]
struct Shared {
    closed: AtomicBool,
    watched: AtomicU64,
    subscribers: Mutex<Subscribers>,
}

impl Shared {
    /// Call every listener, unless the detector has been closed.
    ///
    /// Listeners are snapshotted first so one may (un)subscribe from inside
    /// its own callback.
    fn deliver(&self) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }
        let listeners: Vec<Listener> = {
            let subs = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
            subs.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        debug!(subscribers = listeners.len(), "change detected");
        for listener in listeners {
            (*listener)(ChangeDetected);
        }
    }
}

/// Watches a directory tree and emits one debounced [`ChangeDetected`] per
/// burst of filesystem activity.
///
/// - Paths matching an ignore pattern, or with a segment starting with `.`,
///   are dropped before debouncing.
/// - The first watched event fires immediately; later ones are suppressed
///   until the debounce window has elapsed.
/// - [`close`](Self::close) (or dropping the detector) releases the watch;
///   no notification is delivered after it returns.
///
/// Must be created from within a Tokio runtime.
pub struct ChangeDetector {
    base_dir: PathBuf,
    shared: Arc<Shared>,
    backend: Box<dyn WatchBackend>,
    task: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for ChangeDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeDetector")
            .field("base_dir", &self.base_dir)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl ChangeDetector {
    /// Watch `base_dir` with the platform's recommended watcher and default
    /// options.
    pub fn new(base_dir: impl Into<PathBuf>, patterns: Vec<IgnorePattern>) -> Result<Self> {
        Self::with_options(base_dir, patterns, DetectorOptions::default())
    }

    pub fn with_options(
        base_dir: impl Into<PathBuf>,
        patterns: Vec<IgnorePattern>,
        options: DetectorOptions,
    ) -> Result<Self> {
        Self::with_backend(base_dir, patterns, options, NotifyBackend::new())
    }

    /// Watch `base_dir` through an arbitrary [`WatchBackend`].
    ///
    /// A relative `base_dir` is resolved against the current directory.
    ///
    /// Fails if the backend cannot register the watch (e.g. the directory
    /// does not exist); this is a fatal startup condition for the caller.
    pub fn with_backend<B>(
        base_dir: impl Into<PathBuf>,
        patterns: Vec<IgnorePattern>,
        options: DetectorOptions,
        backend: B,
    ) -> Result<Self>
    where
        B: WatchBackend + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| anyhow!("ChangeDetector must be created inside a Tokio runtime"))?;

        let base_dir = absolute(&base_dir.into());
        let mut backend: Box<dyn WatchBackend> = Box::new(backend);

        let (event_tx, event_rx) = mpsc::unbounded_channel::<WatchMessage>();
        backend.watch(&base_dir, event_tx)?;

        let session = WatchSession::new(
            base_dir.clone(),
            &patterns,
            options.debounce,
            options.report_interval,
        );
        debug!(
            base_dir = ?base_dir,
            patterns = patterns.len(),
            debounce_ms = options.debounce.as_millis() as u64,
            "change detector active"
        );

        let shared = Arc::new(Shared::default());
        let task = runtime.spawn(run_event_loop(event_rx, session, Arc::clone(&shared)));

        Ok(Self {
            base_dir,
            shared,
            backend,
            task: Some(task),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Number of watched (non-ignored) raw events processed so far.
    pub fn watched_count(&self) -> u64 {
        self.shared.watched.load(Ordering::SeqCst)
    }

    /// Register a listener for change notifications.
    ///
    /// Listeners run on the detector task, in subscription order, and
    /// should not block.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(ChangeDetected) + Send + Sync + 'static,
    {
        let mut subs = self.shared.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(subs.next_id);
        subs.next_id += 1;
        subs.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.shared.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = subs.listeners.len();
        subs.listeners.retain(|(sub_id, _)| *sub_id != id);
        subs.listeners.len() != before
    }

    /// Stop watching. Idempotent.
    ///
    /// After this returns no further notification reaches subscribers, even
    /// for filesystem events the OS already buffered.
    pub fn close(&mut self) {
        if self.shared.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }

        if let Err(err) = self.backend.unwatch(&self.base_dir) {
            warn!(base_dir = ?self.base_dir, error = %err, "failed to release file watch");
        }

        info!(base_dir = ?self.base_dir, "change detector closed");
    }
}

impl Drop for ChangeDetector {
    fn drop(&mut self) {
        self.close();
    }
}

/// Consume backend messages in delivery order until the backend goes away
/// or the detector is closed.
async fn run_event_loop(
    mut event_rx: UnboundedReceiver<WatchMessage>,
    mut session: WatchSession,
    shared: Arc<Shared>,
) {
    loop {
        let deadline = session.report_deadline();

        let message = tokio::select! {
            msg = event_rx.recv() => match msg {
                Some(msg) => msg,
                None => break,
            },
            _ = sleep_until_opt(deadline) => {
                session.poll_report(Instant::now());
                continue;
            }
        };

        if shared.closed.load(Ordering::SeqCst) {
            break;
        }

        match message {
            WatchMessage::Changed(path) => {
                let observation = session.observe(&path, Instant::now());
                shared.watched.store(session.watched_count(), Ordering::SeqCst);
                match observation {
                    Observation::Fire => shared.deliver(),
                    Observation::Suppressed => trace!(?path, "change within debounce window"),
                    Observation::Ignored => trace!(?path, "ignored path"),
                }
            }
            WatchMessage::Error(err) => {
                warn!(base_dir = ?session.base_dir(), error = %err, "file watch error");
            }
        }
    }

    debug!("change detector event loop finished");
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(due) => tokio::time::sleep_until(due).await,
        None => std::future::pending().await,
    }
}
