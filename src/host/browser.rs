// src/host/browser.rs

//! Browser handle abstraction.
//!
//! The host only ever asks a browser to refresh, and never looks at the
//! answer. Production code registers [`CommandBrowser`]s; tests can provide
//! their own implementation that records or fails refreshes.
//!
//! [`CommandBrowser`]: crate::exec::CommandBrowser

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

/// Future returned by [`Browser::refresh`].
pub type RefreshFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// An opaque live browser session capable of reloading its page.
pub trait Browser: Send + Sync {
    /// Short human-readable label used in logs.
    fn label(&self) -> String {
        "browser".to_string()
    }

    /// Request a page refresh. Fire-and-forget from the host's point of
    /// view: the result is only logged.
    fn refresh(&self) -> RefreshFuture<'_>;
}
