// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs refresh commands with `tokio::process::Command` on behalf of the
//! browser registry.

pub mod command;

pub use command::CommandBrowser;
