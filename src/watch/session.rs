// src/watch/session.rs

//! Pure per-watch state.
//!
//! A [`WatchSession`] decides, for one raw path observed at one instant,
//! whether it is ignored, suppressed by the debounce window, or should
//! produce a change notification. It has no channels, no Tokio tasks and
//! performs no IO, so the decision sequence for a fixed sequence of
//! `(path, instant)` pairs is deterministic.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::Instant;

use crate::watch::IgnorePattern;
use crate::watch::debounce::Debouncer;
use crate::watch::patterns::IgnoreMatcher;
use crate::watch::report::WatchedFileReporter;

/// Outcome of observing one raw path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Matched an ignore pattern or has a dot-prefixed segment.
    Ignored,
    /// Watched, but inside the debounce window of the previous emission.
    Suppressed,
    /// Watched and outside the window: notify subscribers.
    Fire,
}

#[derive(Debug, Clone)]
pub struct WatchSession {
    matcher: IgnoreMatcher,
    debouncer: Debouncer,
    reporter: WatchedFileReporter,
}

impl WatchSession {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        patterns: &[IgnorePattern],
        debounce: Duration,
        report_interval: Duration,
    ) -> Self {
        Self {
            matcher: IgnoreMatcher::new(base_dir, patterns),
            debouncer: Debouncer::new(debounce),
            reporter: WatchedFileReporter::new(report_interval),
        }
    }

    pub fn base_dir(&self) -> &Path {
        self.matcher.base_dir()
    }

    /// Classify one raw event path seen at `now`.
    ///
    /// Ignored paths leave every counter and the debounce state untouched.
    pub fn observe(&mut self, path: &Path, now: Instant) -> Observation {
        if self.matcher.is_ignored(path) {
            return Observation::Ignored;
        }

        self.reporter.record(now);

        if self.debouncer.should_fire(now) {
            Observation::Fire
        } else {
            Observation::Suppressed
        }
    }

    /// Number of watched (non-ignored) events seen so far.
    pub fn watched_count(&self) -> u64 {
        self.reporter.count()
    }

    pub fn report_deadline(&self) -> Option<Instant> {
        self.reporter.deadline()
    }

    /// Log the watched-file count if its quiet period has elapsed.
    pub fn poll_report(&mut self, now: Instant) -> Option<u64> {
        self.reporter.poll(now)
    }
}
