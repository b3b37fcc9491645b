// src/watch/ignore.rs

//! Ignore-list discovery.
//!
//! Starting at a directory, walk upward until an ignore-list file (by
//! default `.gitignore`) can be read. The nearest file wins: its lines are
//! rooted at the directory it was found in and returned as-is, never merged
//! with files further up or with the caller's defaults.

use std::path::Path;

use tracing::{debug, trace};

use crate::fs::FileSystem;
use crate::watch::IgnorePattern;
use crate::watch::path_utils::absolute;

/// Conventional ignore-list file name.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Patterns used when no ignore-list file exists anywhere in the ancestry,
/// relative to the watch root.
pub const DEFAULT_IGNORE_GLOBS: &[&str] = &["node_modules/**", "bower_components/**"];

/// Look for `.gitignore` in `start_dir` and its ancestors.
///
/// Returns `None` if no readable file exists up to and including the
/// filesystem root.
pub fn resolve_patterns(fs: &dyn FileSystem, start_dir: &Path) -> Option<Vec<IgnorePattern>> {
    resolve_patterns_named(fs, start_dir, DEFAULT_IGNORE_FILE)
}

/// Same as [`resolve_patterns`] with a custom ignore-list file name.
///
/// Read failures of any kind count as "not here" and move the search one
/// directory up.
pub fn resolve_patterns_named(
    fs: &dyn FileSystem,
    start_dir: &Path,
    file_name: &str,
) -> Option<Vec<IgnorePattern>> {
    let mut current = absolute(start_dir);

    loop {
        let candidate = current.join(file_name);
        match fs.read_to_string(&candidate) {
            Ok(contents) => {
                let patterns = parse_ignore_list(&current, &contents);
                debug!(
                    file = ?candidate,
                    count = patterns.len(),
                    "loaded ignore patterns"
                );
                return Some(patterns);
            }
            Err(err) => {
                trace!(file = ?candidate, error = %err, "no usable ignore file");
            }
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Resolve patterns for `root`, falling back to `defaults` (relative globs
/// joined onto `root`) when no ignore-list file is found.
pub fn resolve_or_default(
    fs: &dyn FileSystem,
    root: &Path,
    file_name: &str,
    defaults: &[String],
) -> Vec<IgnorePattern> {
    match resolve_patterns_named(fs, root, file_name) {
        Some(patterns) => patterns,
        None => {
            debug!(root = ?root, "no ignore file found; using default patterns");
            default_patterns(root, defaults)
        }
    }
}

/// Root each default glob at `cwd`.
pub fn default_patterns<S: AsRef<str>>(cwd: &Path, globs: &[S]) -> Vec<IgnorePattern> {
    let cwd = absolute(cwd);
    globs.iter().map(|g| root_line(&cwd, g.as_ref())).collect()
}

/// Split an ignore list into patterns rooted at `dir`.
fn parse_ignore_list(dir: &Path, contents: &str) -> Vec<IgnorePattern> {
    contents
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| root_line(dir, line))
        .collect()
}

/// Join one ignore line onto `dir`.
///
/// A leading `/` anchors the line to `dir` rather than to the filesystem
/// root, and a trailing `/` is dropped so the directory itself matches.
fn root_line(dir: &Path, line: &str) -> IgnorePattern {
    let trimmed = line.trim_start_matches('/');
    let trimmed = trimmed.trim_end_matches('/');
    let joined = if trimmed.is_empty() {
        dir.to_path_buf()
    } else {
        dir.join(trimmed)
    };
    joined.to_string_lossy().replace('\\', "/")
}
