//! Read and change application configuration

use super::Outcome;
use crate::config::AppConfig;
use crate::ui::OutputWriter;
use crate::{Result, SearchFiltersError};
use std::path::{Path, PathBuf};

/// Keys accepted by `config get` and `config set`
pub const CONFIG_KEYS: [&str; 5] = ["quiet", "auto_backup", "search_command", "settings_path", "log_level"];

fn unknown_key(key: &str) -> SearchFiltersError {
    SearchFiltersError::InvalidInput(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value.parse::<bool>().map_err(|_| {
        SearchFiltersError::InvalidInput(format!(
            "Invalid value for {key}: '{value}'. Use 'true' or 'false'"
        ))
    })
}

/// Empty values clear optional settings
fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn value_of(config: &AppConfig, key: &str) -> Result<String> {
    Ok(match key {
        "quiet" => config.quiet.to_string(),
        "auto_backup" => config.auto_backup.to_string(),
        "search_command" => config.search_command.clone().unwrap_or_default(),
        "settings_path" => config
            .settings_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        "log_level" => config.log_level.clone().unwrap_or_default(),
        _ => return Err(unknown_key(key)),
    })
}

fn apply(config: &mut AppConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "quiet" => config.quiet = parse_bool(key, value)?,
        "auto_backup" => config.auto_backup = parse_bool(key, value)?,
        "search_command" => config.search_command = optional(value),
        "settings_path" => config.settings_path = optional(value).map(PathBuf::from),
        "log_level" => {
            if !value.is_empty() && value.parse::<tracing::Level>().is_err() {
                return Err(SearchFiltersError::InvalidInput(format!(
                    "Invalid value for log_level: '{value}'. Use error, warn, info, debug or trace"
                )));
            }
            config.log_level = optional(value);
        }
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

/// Print the effective value of one setting
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown key.
pub fn config_get(config: &AppConfig, key: &str, output: &dyn OutputWriter) -> Result<Outcome> {
    output.write(&value_of(config, key.trim())?);
    Ok(Outcome::Applied)
}

/// Apply a `key=value` setting to the config file at `path`
///
/// Environment overrides are not written back.
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed setting, an unknown key or a bad
/// value, and a configuration error if the file cannot be read or written.
pub fn config_set(path: &Path, setting: &str, output: &dyn OutputWriter) -> Result<Outcome> {
    let (key, value) = setting.split_once('=').ok_or_else(|| {
        SearchFiltersError::InvalidInput("Invalid format. Use: search-filters config set key=value".into())
    })?;
    let (key, value) = (key.trim(), value.trim());

    let mut config = AppConfig::load_file(path)?;
    let before = value_of(&config, key)?;
    apply(&mut config, key, value)?;
    let after = value_of(&config, key)?;
    if before == after {
        output.info(&format!("{key} is already '{after}'"));
        return Ok(Outcome::NoChanges);
    }

    config.save_to(path)?;
    output.success(&format!("Set {key} = {after}"));
    Ok(Outcome::Applied)
}
