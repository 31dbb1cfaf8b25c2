//! Host settings namespace
//!
//! The global filter store persists into a key-value settings namespace that
//! belongs to the host. This module defines the handle the stores are given
//! (`SettingsStore`) and two implementations:
//!
//! - `JsonFileSettings` keeps the namespace as one JSON object on disk
//! - `MemorySettings` keeps it in memory, for tests and embedding hosts

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Errors raised by a settings backend
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error while reading or writing the settings file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not a JSON object
    #[error("Malformed settings at {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// Serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refused the write
    #[error("Settings backend unavailable: {0}")]
    Unavailable(String),
}

/// Handle to a key-value settings namespace
///
/// Values are JSON documents so that records written by other hosts of the
/// same namespace round-trip unchanged.
pub trait SettingsStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, SettingsError>;

    /// Write several keys as one logical unit
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the backend cannot be written.
    fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), SettingsError>;

    /// Write a single key
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the backend cannot be written.
    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.set_many(vec![(key.to_string(), value)])
    }
}

/// Settings namespace stored as a pretty-printed JSON object file
///
/// Keys this crate does not know about are preserved on every write.
#[derive(Debug)]
pub struct JsonFileSettings {
    path: PathBuf,
    auto_backup: bool,
}

impl JsonFileSettings {
    /// Create a handle for the settings file at `path`
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            auto_backup: true,
        }
    }

    /// Create a handle with auto-backup disabled
    #[must_use]
    pub const fn without_backup(path: PathBuf) -> Self {
        Self {
            path,
            auto_backup: false,
        }
    }

    /// Enable or disable auto-backup
    pub const fn set_auto_backup(&mut self, enabled: bool) {
        self.auto_backup = enabled;
    }

    /// Path of the settings file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>, SettingsError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(SettingsError::Malformed {
                path: self.path.clone(),
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
            Err(e) => Err(SettingsError::Malformed {
                path: self.path.clone(),
                reason: e.to_string(),
            }),
        }
    }

    fn write_object(&self, map: Map<String, Value>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        if self.auto_backup && self.path.exists() {
            let backup_path = self.path.with_extension("json.backup");
            fs::copy(&self.path, backup_path)?;
        }

        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileSettings {
    fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        let mut map = self.read_object()?;
        Ok(map.remove(key))
    }

    fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), SettingsError> {
        // A malformed file is not silently replaced
        let mut map = self.read_object()?;
        for (key, value) in entries {
            map.insert(key, value);
        }
        self.write_object(map)?;
        tracing::debug!(path = %self.path.display(), "Wrote settings file");
        Ok(())
    }
}

/// In-memory settings namespace
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<Map<String, Value>>,
    read_only: bool,
}

impl MemorySettings {
    /// Create an empty namespace
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a namespace pre-populated with `values`
    #[must_use]
    pub fn with_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self {
            values: Mutex::new(values.into_iter().collect()),
            read_only: false,
        }
    }

    /// Create a namespace that rejects every write
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            values: Mutex::new(Map::new()),
            read_only: true,
        }
    }

    /// Snapshot of the raw value stored under `key`
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<Value> {
        self.values
            .lock()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        let map = self
            .values
            .lock()
            .map_err(|e| SettingsError::Unavailable(e.to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), SettingsError> {
        if self.read_only {
            return Err(SettingsError::Unavailable("namespace is read-only".to_string()));
        }
        let mut map = self
            .values
            .lock()
            .map_err(|e| SettingsError::Unavailable(e.to_string()))?;
        for (key, value) in entries {
            map.insert(key, value);
        }
        Ok(())
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let settings = JsonFileSettings::new(dir.path().join("settings.json"));
        assert_eq!(settings.get("globalFilters").unwrap(), None);
    }

    #[test]
    fn test_set_many_preserves_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "editor.fontSize": 14 }"#).unwrap();

        let settings = JsonFileSettings::without_backup(path.clone());
        settings
            .set_many(vec![
                ("globalFilters".to_string(), json!([])),
                ("globalFiltersEnabled".to_string(), json!({})),
            ])
            .unwrap();

        assert_eq!(settings.get("editor.fontSize").unwrap(), Some(json!(14)));
        assert_eq!(settings.get("globalFilters").unwrap(), Some(json!([])));
        assert!(!path.with_extension("json.backup").exists());
    }

    #[test]
    fn test_backup_written_before_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings = JsonFileSettings::new(path.clone());

        settings.set("a", json!(1)).unwrap();
        settings.set("a", json!(2)).unwrap();

        let backup = fs::read_to_string(path.with_extension("json.backup")).unwrap();
        let backup: Value = serde_json::from_str(&backup).unwrap();
        assert_eq!(backup["a"], json!(1));
        assert_eq!(settings.get("a").unwrap(), Some(json!(2)));
    }

    #[test]
    fn test_malformed_file_is_an_error_and_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2").unwrap();

        let settings = JsonFileSettings::without_backup(path.clone());
        assert!(settings.get("globalFilters").is_err());
        assert!(settings.set("globalFilters", json!([])).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2");
    }

    #[test]
    fn test_non_object_file_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[]").unwrap();

        let settings = JsonFileSettings::without_backup(path);
        assert!(matches!(
            settings.get("x"),
            Err(SettingsError::Malformed { .. })
        ));
    }

    #[test]
    fn test_memory_settings_read_only_rejects_writes() {
        let settings = MemorySettings::read_only();
        assert!(settings.set("x", json!(true)).is_err());
        assert_eq!(settings.get("x").unwrap(), None);
    }
}
