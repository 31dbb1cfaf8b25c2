//! Testing utilities for search-filters
//!
//! This module provides `TestWorkspace`, a temporary workspace root plus an
//! in-memory settings namespace wired into a `FilterRegistry`.
//!
//! Only available when compiled with `cfg(test)`.

use crate::commands::Context;
use crate::filters::{FilterRegistry, FilterScope, FixedDecisions, SearchFilter};
use crate::settings::MemorySettings;
use crate::ui::{BufferedWriter, UserInput};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Temporary workspace wired to a registry
///
/// The workspace directory is removed when the wrapper goes out of scope.
pub struct TestWorkspace {
    dir: TempDir,
    pub settings: Arc<MemorySettings>,
    pub registry: FilterRegistry,
    pub output: BufferedWriter,
}

impl TestWorkspace {
    /// Create an empty workspace with an empty settings namespace
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(MemorySettings::new())
    }

    /// Create a workspace over the given settings namespace
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn with_settings(settings: MemorySettings) -> Self {
        let dir = TempDir::new().expect("Failed to create test workspace");
        let settings = Arc::new(settings);
        let registry = FilterRegistry::new(settings.clone(), Some(dir.path().to_path_buf()));
        Self {
            dir,
            settings,
            registry,
            output: BufferedWriter::new(),
        }
    }

    /// Root of the workspace
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the workspace filter file
    #[must_use]
    pub fn filter_file(&self) -> PathBuf {
        self.root().join(".vscode").join("custom-search-filters.json")
    }

    /// Raw contents of the workspace filter file, if written
    #[must_use]
    pub fn filter_file_contents(&self) -> Option<String> {
        fs::read_to_string(self.filter_file()).ok()
    }

    /// Command context using `input` and the buffered output
    #[must_use]
    pub fn context<'a>(&'a self, input: &'a dyn UserInput) -> Context<'a> {
        Context::new(&self.registry, input, &self.output)
    }

    /// Store a filter directly, bypassing prompts
    ///
    /// # Panics
    /// Panics if the store rejects the write.
    pub fn seed(&self, filter: SearchFilter, scope: FilterScope) {
        assert!(
            self.registry
                .save(filter, Some(scope), &FixedDecisions::overwrite())
                .succeeded(),
            "Failed to seed filter"
        );
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_seed_and_files() {
        let ws = TestWorkspace::new();
        assert!(ws.filter_file_contents().is_none());

        ws.seed(SearchFilter::new("W", "w/**", ""), FilterScope::Workspace);
        ws.seed(SearchFilter::new("G", "g/**", ""), FilterScope::Global);

        assert!(ws.filter_file_contents().unwrap().contains("\"W\""));
        assert!(ws.settings.raw("globalFilters").is_some());
        assert_eq!(ws.registry.load_all().len(), 2);
    }
}
