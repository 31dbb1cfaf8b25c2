//! Workspace filter store
//!
//! Workspace filters live in `<root>/.vscode/custom-search-filters.json` as a
//! pretty-printed JSON array of `{name, include, exclude}`. The file is the
//! only source of truth: every save rewrites it entirely.

use super::error::FilterError;
use super::types::{FilterDefinition, FilterScope, SearchFilter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Directory, relative to the workspace root, holding the filter file
pub const WORKSPACE_FILTERS_DIR: &str = ".vscode";
/// File name of the workspace filter file
pub const WORKSPACE_FILTERS_FILE: &str = "custom-search-filters.json";

/// Store for workspace-scope filters
#[derive(Debug, Clone)]
pub struct WorkspaceFilterStore {
    root: Option<PathBuf>,
}

impl WorkspaceFilterStore {
    /// Create a store for the workspace at `root` (`None` when no workspace is open)
    #[must_use]
    pub const fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// The workspace root, if any
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Location of the filter file, if a workspace is open
    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        self.root
            .as_ref()
            .map(|root| root.join(WORKSPACE_FILTERS_DIR).join(WORKSPACE_FILTERS_FILE))
    }

    /// Load all workspace filters
    ///
    /// Returns an empty list when no workspace is open, the file is missing,
    /// or it cannot be read or parsed.
    #[must_use]
    pub fn load(&self) -> Vec<SearchFilter> {
        self.try_load().unwrap_or_else(|e| {
            error!(error = %e, "Failed to load workspace filters");
            Vec::new()
        })
    }

    /// Load all workspace filters, reporting read and parse failures
    ///
    /// A missing workspace or file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if the file exists but cannot be read or parsed.
    pub fn try_load(&self) -> Result<Vec<SearchFilter>, FilterError> {
        let Some(path) = self.file_path() else {
            return Ok(Vec::new());
        };
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path)?;
        let definitions: Vec<FilterDefinition> = serde_json::from_str(&contents)
            .map_err(|e| FilterError::malformed_file(&path, &e))?;

        Ok(definitions
            .into_iter()
            .map(|def| def.into_filter(FilterScope::Workspace, None))
            .collect())
    }

    /// Save the workspace subset of `filters`, replacing the file
    ///
    /// Returns `false` on failure; the failure is logged.
    #[must_use]
    pub fn save(&self, filters: &[SearchFilter]) -> bool {
        match self.try_save(filters) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to save workspace filters");
                false
            }
        }
    }

    /// Save the workspace subset of `filters`, reporting failures
    ///
    /// Creates the `.vscode` directory when missing.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if no workspace is open or the file cannot be written.
    pub fn try_save(&self, filters: &[SearchFilter]) -> Result<(), FilterError> {
        let path = self.file_path().ok_or(FilterError::NoWorkspace)?;

        let definitions: Vec<FilterDefinition> = filters
            .iter()
            .filter(|f| f.scope == FilterScope::Workspace)
            .map(SearchFilter::definition)
            .collect();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&definitions)?;
        fs::write(&path, json)?;

        debug!(count = definitions.len(), path = %path.display(), "Saved workspace filters");
        Ok(())
    }

    /// Delete the workspace filter named `name`
    ///
    /// Returns `false` if nothing was removed or the save failed.
    #[must_use]
    pub fn delete(&self, name: &str) -> bool {
        let mut filters = match self.try_load() {
            Ok(filters) => filters,
            Err(e) => {
                error!(error = %e, filter = %name, "Failed to load workspace filters for delete");
                return false;
            }
        };

        let before = filters.len();
        filters.retain(|f| !f.is(name, FilterScope::Workspace));
        if filters.len() == before {
            debug!(filter = %name, "Workspace filter not found for delete");
            return false;
        }

        self.save(&filters)
    }

    /// Replace the filter named `original_name` with `filter`
    ///
    /// Keeps the original position and drops any other record already named
    /// like `filter`, all in one write.
    #[must_use]
    pub fn replace(&self, original_name: &str, filter: SearchFilter) -> bool {
        let mut filters = match self.try_load() {
            Ok(filters) => filters,
            Err(e) => {
                error!(error = %e, filter = %original_name, "Failed to load workspace filters for update");
                return false;
            }
        };

        let filter = SearchFilter {
            enabled: None,
            ..filter.with_scope(FilterScope::Workspace)
        };
        if !super::replace_record(&mut filters, original_name, filter) {
            debug!(filter = %original_name, "Workspace filter not found for update");
            return false;
        }

        self.save(&filters)
    }
}
