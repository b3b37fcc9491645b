// src/host/session.rs

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::SubscriptionId;
use crate::watch::{
    resolve_or_default, ChangeDetector, DetectorOptions, NotifyBackend, WatchBackend,
    DEFAULT_IGNORE_FILE, DEFAULT_IGNORE_GLOBS,
};

use super::browser::Browser;
use super::registry::BrowserRegistry;

/// What the host tells us about the test session.
#[derive(Debug, Clone)]
pub struct HostOptions {
    /// Watching only makes sense when browsers stay open between runs.
    pub persistent: bool,
    /// Directory to watch; conventionally the working directory.
    pub root: PathBuf,
    /// Ignore-list file name searched for in `root` and its ancestors.
    pub ignore_file: String,
    /// Globs (relative to `root`) used when no ignore-list file is found.
    pub default_ignore: Vec<String>,
    pub detector: DetectorOptions,
}

impl HostOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            persistent: true,
            root: root.into(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            default_ignore: DEFAULT_IGNORE_GLOBS.iter().map(|g| g.to_string()).collect(),
            detector: DetectorOptions::default(),
        }
    }

    pub fn from_config(cfg: &ConfigFile, root: impl Into<PathBuf>) -> Self {
        Self {
            persistent: cfg.session().persistent,
            root: root.into(),
            ignore_file: cfg.watch().ignore_file.clone(),
            default_ignore: cfg.watch().default_ignore.clone(),
            detector: DetectorOptions {
                debounce: cfg.watch().debounce(),
                report_interval: cfg.watch().report_interval(),
            },
        }
    }
}

/// A change detector wired to a set of browsers: every notification
/// refreshes every registered browser.
#[derive(Debug)]
pub struct ReloadSession {
    detector: ChangeDetector,
    browsers: BrowserRegistry,
    subscription: SubscriptionId,
}

impl ReloadSession {
    /// Start watching `options.root` on the real filesystem.
    ///
    /// Returns `Ok(None)` without watching anything when the session is not
    /// persistent.
    pub fn start(options: &HostOptions) -> Result<Option<Self>> {
        Self::start_with(options, &RealFileSystem, NotifyBackend::new())
    }

    pub fn start_with<B>(
        options: &HostOptions,
        fs: &dyn FileSystem,
        backend: B,
    ) -> Result<Option<Self>>
    where
        B: WatchBackend + 'static,
    {
        if !options.persistent {
            info!("session is not persistent; not watching for changes");
            return Ok(None);
        }

        let patterns = resolve_or_default(
            fs,
            &options.root,
            &options.ignore_file,
            &options.default_ignore,
        );
        debug!(?patterns, "effective ignore patterns");

        let detector =
            ChangeDetector::with_backend(options.root.clone(), patterns, options.detector, backend)?;

        let browsers = BrowserRegistry::new();
        let subscription = {
            let browsers = browsers.clone();
            detector.subscribe(move |_| {
                let requested = browsers.refresh_all();
                debug!(requested, "refresh requested");
            })
        };

        Ok(Some(Self {
            detector,
            browsers,
            subscription,
        }))
    }

    /// Host hook for "browser session started".
    pub fn on_browser_start(&self, browser: Arc<dyn Browser>) -> bool {
        self.browsers.add(browser)
    }

    pub fn browsers(&self) -> &BrowserRegistry {
        &self.browsers
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    /// Stop refreshing and release the watch.
    pub fn close(&mut self) {
        self.detector.unsubscribe(self.subscription);
        self.detector.close();
    }
}
