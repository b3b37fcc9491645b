// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Finding the ignore-list file and turning it into absolute patterns.
//! - Compiling those patterns and deciding which paths are ignored.
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Debouncing watched events into `ChangeDetected` notifications.
//!
//! It does **not** know about browsers; it only turns filesystem activity
//! into notifications for whoever subscribed.

/// Absolute-path glob used to exclude paths from the watch.
pub type IgnorePattern = String;

pub mod debounce;
pub mod detector;
pub mod ignore;
pub mod path_utils;
pub mod patterns;
pub mod report;
pub mod session;
pub mod watcher;

pub use debounce::Debouncer;
pub use detector::{ChangeDetector, DetectorOptions, Listener};
pub use ignore::{
    default_patterns, resolve_or_default, resolve_patterns, resolve_patterns_named,
    DEFAULT_IGNORE_FILE, DEFAULT_IGNORE_GLOBS,
};
pub use patterns::IgnoreMatcher;
pub use session::{Observation, WatchSession};
pub use watcher::{NotifyBackend, WatchBackend, WatchMessage};
