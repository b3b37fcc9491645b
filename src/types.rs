// src/types.rs

use std::fmt;

/// Notification delivered to subscribers when a watched path changed.
///
/// Carries no payload: which path changed, and how, is intentionally not
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeDetected;

/// Handle returned by `ChangeDetector::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}
