//! search-filters - named search filters for a code editor's file search
//!
//! A filter is a named pair of comma-separated include and exclude glob lists.
//! Filters live either in a global settings namespace or in a per-workspace
//! JSON file; this library stores, merges, edits and applies them.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod filters;
pub mod launch;
pub mod patterns;
pub mod settings;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum SearchFiltersError {
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Prompt failure
    #[error("Input error: {0}")]
    Input(#[from] ui::InputError),
    /// Search could not be started
    #[error("Search error: {0}")]
    Launch(#[from] launch::LaunchError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, SearchFiltersError>;
