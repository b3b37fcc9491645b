// src/exec/command.rs

//! Shell-command browser handle.

use std::process::Stdio;

use anyhow::{anyhow, Context};
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::Result;
use crate::host::{Browser, RefreshFuture};

/// A "browser" whose refresh is an arbitrary shell command, e.g. a
/// WebDriver `POST /session/{id}/refresh` issued through `curl`.
#[derive(Debug, Clone)]
pub struct CommandBrowser {
    cmd: String,
}

impl CommandBrowser {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }
}

impl Browser for CommandBrowser {
    fn label(&self) -> String {
        format!("cmd:{}", self.cmd)
    }

    fn refresh(&self) -> RefreshFuture<'_> {
        Box::pin(run_refresh_command(&self.cmd))
    }
}

async fn run_refresh_command(shell_cmd: &str) -> Result<()> {
    info!(cmd = %shell_cmd, "refreshing");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(shell_cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(shell_cmd);
        c
    };

    cmd.stdin(Stdio::null()).kill_on_drop(true);

    let status = cmd
        .status()
        .await
        .with_context(|| format!("spawning refresh command '{}'", shell_cmd))?;

    debug!(cmd = %shell_cmd, ?status, "refresh command finished");
    if !status.success() {
        return Err(anyhow!("refresh command '{}' exited with {}", shell_cmd, status).into());
    }
    Ok(())
}
