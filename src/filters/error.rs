//! Error types for filter storage
//!
//! The stores degrade every failure to an empty list or a `false` flag at
//! their public boundary; these errors are what the fallible `try_*`
//! variants report and what gets logged.

use crate::settings::SettingsError;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading or writing filters
#[derive(Debug, Error)]
pub enum FilterError {
    /// No workspace root is open
    #[error("No workspace folder is open")]
    NoWorkspace,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Persisted data could not be decoded
    #[error("Malformed filter data in {location}: {reason}")]
    Malformed { location: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Settings namespace error
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl FilterError {
    /// Decode failure for a settings key
    #[must_use]
    pub fn malformed_key(key: &str, err: &serde_json::Error) -> Self {
        Self::Malformed {
            location: format!("setting '{key}'"),
            reason: err.to_string(),
        }
    }

    /// Decode failure for a file
    #[must_use]
    pub fn malformed_file(path: &Path, err: &serde_json::Error) -> Self {
        Self::Malformed {
            location: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
