#![allow(dead_code)]

use reloadwatch::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.config.watch.debounce_ms = ms;
        self
    }

    pub fn report_interval_ms(mut self, ms: u64) -> Self {
        self.config.watch.report_interval_ms = ms;
        self
    }

    pub fn ignore_file(mut self, name: &str) -> Self {
        self.config.watch.ignore_file = name.to_string();
        self
    }

    pub fn default_ignore(mut self, globs: &[&str]) -> Self {
        self.config.watch.default_ignore = globs.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn persistent(mut self, val: bool) -> Self {
        self.config.session.persistent = val;
        self
    }

    pub fn with_refresh_cmd(mut self, cmd: &str) -> Self {
        self.config.session.refresh_cmd.push(cmd.to_string());
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
