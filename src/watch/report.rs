// src/watch/report.rs

//! Cosmetic "watching N files" line.
//!
//! Each watched (non-ignored) event bumps a counter and pushes the report
//! deadline out by `interval`; the line is logged once activity has been
//! quiet for that long. Owned by a single detector task.

use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

/// Default quiet period before the count is reported.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct WatchedFileReporter {
    interval: Duration,
    count: u64,
    deadline: Option<Instant>,
}

impl WatchedFileReporter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            count: 0,
            deadline: None,
        }
    }

    /// Count one watched path seen at `now` and re-arm the timer.
    pub fn record(&mut self, now: Instant) {
        self.count += 1;
        self.deadline = Some(now + self.interval);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// When the pending report is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Emit the report if its deadline has passed. Returns the reported
    /// count.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        match self.deadline {
            Some(due) if due <= now => {
                self.deadline = None;
                info!("watching {} files", self.count);
                Some(self.count)
            }
            _ => None,
        }
    }
}

impl Default for WatchedFileReporter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_INTERVAL)
    }
}
