// src/config/validate.rs

use std::path::{Component, Path};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ReloadError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::ReloadError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.watch, raw.session))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_durations(cfg)?;
    validate_ignore_file(cfg)?;
    validate_refresh_commands(cfg)?;
    Ok(())
}

fn validate_durations(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.debounce_ms == 0 {
        return Err(ReloadError::ConfigError(
            "[watch].debounce_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.watch.report_interval_ms == 0 {
        return Err(ReloadError::ConfigError(
            "[watch].report_interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

/// The ignore file is looked up in every ancestor directory, so it has to
/// be a bare file name.
fn validate_ignore_file(cfg: &RawConfigFile) -> Result<()> {
    let name = cfg.watch.ignore_file.as_str();
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ReloadError::ConfigError(format!(
            "[watch].ignore_file must be a plain file name (got '{}')",
            name
        ))),
    }
}

fn validate_refresh_commands(cfg: &RawConfigFile) -> Result<()> {
    for (idx, cmd) in cfg.session.refresh_cmd.iter().enumerate() {
        if cmd.trim().is_empty() {
            return Err(ReloadError::ConfigError(format!(
                "[session].refresh_cmd[{}] is empty",
                idx
            )));
        }
    }
    Ok(())
}
