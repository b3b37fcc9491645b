// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod host;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_or_default, ConfigFile};
use crate::exec::CommandBrowser;
use crate::fs::RealFileSystem;
use crate::host::{HostOptions, ReloadSession};
use crate::watch::resolve_or_default;

pub use crate::types::{ChangeDetected, SubscriptionId};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - ignore-pattern resolution and the change detector
/// - one command browser per configured refresh command
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref().map(Path::new))?;
    let root = watch_root(args.root.as_deref())?;
    let options = HostOptions::from_config(&cfg, root);

    if args.dry_run {
        print_dry_run(&cfg, &options);
        return Ok(());
    }

    let Some(mut session) = ReloadSession::start(&options)? else {
        return Ok(());
    };

    for cmd in cfg.session().refresh_cmd.iter().chain(args.refresh_cmd.iter()) {
        session.on_browser_start(Arc::new(CommandBrowser::new(cmd.clone())));
    }

    info!(
        root = ?options.root,
        browsers = session.browsers().len(),
        "watching for changes; press Ctrl+C to stop"
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("failed to listen for Ctrl+C: {e}");
    }

    session.close();
    info!("shutting down");
    Ok(())
}

/// Directory to watch: `--root` if given, else the current working
/// directory, canonicalized when possible.
fn watch_root(explicit: Option<&str>) -> Result<PathBuf> {
    let root = match explicit {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    Ok(root.canonicalize().unwrap_or(root))
}

/// Simple dry-run output: effective settings and ignore patterns.
fn print_dry_run(cfg: &ConfigFile, options: &HostOptions) {
    let patterns = resolve_or_default(
        &RealFileSystem,
        &options.root,
        &options.ignore_file,
        &options.default_ignore,
    );

    println!("reloadwatch dry-run");
    println!("  root = {}", options.root.display());
    println!("  session.persistent = {}", options.persistent);
    println!("  watch.debounce_ms = {}", cfg.watch().debounce_ms);
    println!("  watch.report_interval_ms = {}", cfg.watch().report_interval_ms);
    println!("  watch.ignore_file = {}", options.ignore_file);
    println!();

    println!("ignore patterns ({}):", patterns.len());
    for pattern in &patterns {
        println!("  - {pattern}");
    }

    if !cfg.session().refresh_cmd.is_empty() {
        println!();
        println!("refresh commands ({}):", cfg.session().refresh_cmd.len());
        for cmd in &cfg.session().refresh_cmd {
            println!("  - {cmd}");
        }
    }

    debug!("dry-run complete (nothing watched)");
}
