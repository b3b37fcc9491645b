// src/host/registry.rs

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::browser::Browser;

/// Set of known browser handles, deduplicated by identity.
///
/// Handles are never removed: a browser that went away keeps receiving
/// (failing) refresh requests for the rest of the session.
#[derive(Clone, Default)]
pub struct BrowserRegistry {
    inner: Arc<Mutex<Vec<Arc<dyn Browser>>>>,
}

impl std::fmt::Debug for BrowserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl BrowserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle. Returns false if this exact handle is already
    /// known.
    pub fn add(&self, browser: Arc<dyn Browser>) -> bool {
        let mut browsers = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if browsers.iter().any(|b| Arc::ptr_eq(b, &browser)) {
            return false;
        }
        debug!(browser = %browser.label(), "browser registered");
        browsers.push(browser);
        true
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handles registered at this instant.
    pub fn snapshot(&self) -> Vec<Arc<dyn Browser>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Ask every currently registered browser to refresh.
    ///
    /// Each refresh runs as its own task and its outcome is ignored, so one
    /// unreachable browser never holds up the others. Must be called from
    /// within a Tokio runtime. Returns how many refreshes were requested.
    pub fn refresh_all(&self) -> usize {
        let browsers = self.snapshot();
        for browser in &browsers {
            let browser = Arc::clone(browser);
            tokio::spawn(async move {
                if let Err(err) = browser.refresh().await {
                    debug!(browser = %browser.label(), error = %err, "refresh failed; ignoring");
                }
            });
        }
        browsers.len()
    }
}
