//! Configuration module for search-filters
//!
//! Application configuration lives in `config.toml` in the user's config
//! directory (`~/.config/search-filters/config.toml` on Linux). Every field
//! can be overridden with a `SEARCH_FILTERS_<FIELD>` environment variable.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config directory
pub const APP_DIR: &str = "search-filters";

const fn default_auto_backup() -> bool {
    true
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Settings namespace file holding global filters (default: next to this config)
    #[serde(default)]
    pub settings_path: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Shell command used to run a search; `{include}` and `{exclude}` stand for the patterns
    #[serde(default)]
    pub search_command: Option<String>,

    /// Keep a `.backup` copy of the settings file before each write
    #[serde(default = "default_auto_backup")]
    pub auto_backup: bool,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings_path: None,
            quiet: false,
            search_command: None,
            auto_backup: default_auto_backup(),
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Directory holding the config and default settings files
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join(APP_DIR))
    }

    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults (plus environment overrides).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("SEARCH_FILTERS"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load only what is written in the file at `path`, without environment overrides
    ///
    /// Used before rewriting the file so overrides are not persisted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .build()?
            .try_deserialize()
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Resolved location of the settings namespace file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the system config
    /// directory cannot be determined.
    pub fn resolved_settings_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.settings_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("settings.json")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.settings_path.is_none());
        assert!(config.search_command.is_none());
        assert!(config.auto_backup);
        assert!(!config.quiet);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.auto_backup);
        assert!(config.settings_path.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = AppConfig {
            settings_path: Some(dir.path().join("settings.json")),
            quiet: true,
            search_command: Some("rg -g '{include}'".to_string()),
            auto_backup: false,
            log_level: Some("debug".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert!(loaded.quiet);
        assert!(loaded.auto_backup);
    }

    #[test]
    fn test_resolved_settings_path_prefers_configured() {
        let config = AppConfig {
            settings_path: Some(PathBuf::from("/tmp/custom.json")),
            ..AppConfig::default()
        };
        assert_eq!(config.resolved_settings_path().unwrap(), PathBuf::from("/tmp/custom.json"));
    }
}
