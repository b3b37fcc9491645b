// src/host/mod.rs

//! Host-side glue: browser handles and the session that refreshes them.

pub mod browser;
pub mod registry;
pub mod session;

pub use browser::{Browser, RefreshFuture};
pub use registry::BrowserRegistry;
pub use session::{HostOptions, ReloadSession};
