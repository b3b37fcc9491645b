// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [watch]
/// debounce_ms = 200
/// report_interval_ms = 1000
/// ignore_file = ".gitignore"
/// default_ignore = ["node_modules/**", "bower_components/**"]
///
/// [session]
/// persistent = true
/// refresh_cmd = ["curl -s -X POST http://localhost:4444/session/abc/refresh"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub session: SessionSection,
}

/// `[watch]` section: everything the change detector needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Minimum time between two emitted change notifications.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Quiet period before the "watching N files" line is logged.
    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,

    /// Name of the ignore-list file searched for in the root's ancestry.
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Patterns (relative to the watch root) used when no ignore-list file
    /// is found.
    #[serde(default = "default_ignore")]
    pub default_ignore: Vec<String>,
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_report_interval_ms() -> u64 {
    1000
}

fn default_ignore_file() -> String {
    ".gitignore".to_string()
}

fn default_ignore() -> Vec<String> {
    vec!["node_modules/**".to_string(), "bower_components/**".to_string()]
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            report_interval_ms: default_report_interval_ms(),
            ignore_file: default_ignore_file(),
            default_ignore: default_ignore(),
        }
    }
}

impl WatchSection {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }
}

/// `[session]` section: host-side behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    /// Watching only makes sense for a persistent browser session. When
    /// false, no detector is constructed at all.
    #[serde(default = "default_persistent")]
    pub persistent: bool,

    /// Shell commands, each registered as one browser handle.
    #[serde(default)]
    pub refresh_cmd: Vec<String>,
}

fn default_persistent() -> bool {
    true
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            persistent: default_persistent(),
            refresh_cmd: Vec::new(),
        }
    }
}

/// Validated configuration. Only obtainable through
/// `ConfigFile::try_from(RawConfigFile)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    watch: WatchSection,
    session: SessionSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(watch: WatchSection, session: SessionSection) -> Self {
        Self { watch, session }
    }

    pub fn watch(&self) -> &WatchSection {
        &self.watch
    }

    pub fn session(&self) -> &SessionSection {
        &self.session
    }
}
