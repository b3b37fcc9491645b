// src/watch/patterns.rs

use std::fmt;
use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::warn;

use crate::watch::IgnorePattern;
use crate::watch::path_utils::relative_to;

/// Compiled ignore patterns for one watch root.
///
/// A path is ignored when:
/// - it, or any directory above it, matches one of the absolute patterns, or
/// - any of its segments below the root starts with a `.`.
#[derive(Clone)]
pub struct IgnoreMatcher {
    base_dir: PathBuf,
    set: GlobSet,
    pattern_count: usize,
}

impl fmt::Debug for IgnoreMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgnoreMatcher")
            .field("base_dir", &self.base_dir)
            .field("pattern_count", &self.pattern_count)
            .finish_non_exhaustive()
    }
}

impl IgnoreMatcher {
    /// Compile `patterns` for paths under `base_dir`.
    ///
    /// Patterns that are not valid globs are skipped with a warning: ignore
    /// lists are user-edited and a bad line must not stop the watch.
    pub fn new(base_dir: impl Into<PathBuf>, patterns: &[IgnorePattern]) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut pattern_count = 0;

        for pat in patterns {
            match compile(pat) {
                Ok(globs) => {
                    for glob in globs {
                        builder.add(glob);
                    }
                    pattern_count += 1;
                }
                Err(err) => warn!(pattern = %pat, error = %err, "skipping invalid ignore pattern"),
            }
        }

        let set = builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "failed to build ignore set; no patterns applied");
            GlobSet::empty()
        });

        Self {
            base_dir: base_dir.into(),
            set,
            pattern_count,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Number of patterns that compiled successfully.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Returns true if events for `path` must be discarded.
    ///
    /// Relative paths are taken relative to the base directory.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let abs = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };

        self.has_dot_segment(&abs) || self.matches_pattern(&abs)
    }

    fn has_dot_segment(&self, abs: &Path) -> bool {
        let rel = relative_to(&self.base_dir, abs);
        let rel = rel.as_deref().unwrap_or(abs);
        rel.components().any(|c| match c {
            Component::Normal(seg) => seg.to_string_lossy().starts_with('.'),
            _ => false,
        })
    }

    /// Match the path and each of its ancestors; a pattern naming a
    /// directory covers everything below it.
    fn matches_pattern(&self, abs: &Path) -> bool {
        if self.set.is_empty() {
            return false;
        }
        abs.ancestors()
            .take_while(|p| p.parent().is_some())
            .any(|p| self.set.is_match(normalize(p)))
    }
}

/// Compile one pattern. A trailing `/**` also covers the directory it
/// hangs off, so `node_modules/**` ignores `node_modules` itself.
fn compile(pat: &str) -> Result<Vec<Glob>, globset::Error> {
    let mut globs = vec![build_glob(pat)?];
    if let Some(dir) = pat.strip_suffix("/**").filter(|d| !d.is_empty()) {
        globs.push(build_glob(dir)?);
    }
    Ok(globs)
}

fn build_glob(pat: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pat).literal_separator(true).build()
}

fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
