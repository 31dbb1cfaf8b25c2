//! Global filter store
//!
//! Global filters live in the host settings namespace under two keys:
//!
//! - `globalFilters`: ordered list of `{name, include, exclude}`
//! - `globalFiltersEnabled`: map of filter name to enabled flag
//!
//! Before the global/workspace split, filters were kept as one blob under
//! `customSearchFilters`. That blob is read once at startup to seed the new
//! layout and is never modified.

use super::error::FilterError;
use super::types::{FilterDefinition, FilterScope, SearchFilter};
use crate::settings::SettingsStore;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Settings key holding the global filter definitions
pub const GLOBAL_FILTERS_KEY: &str = "globalFilters";
/// Settings key holding the enabled flags of global filters
pub const GLOBAL_FILTERS_ENABLED_KEY: &str = "globalFiltersEnabled";
/// Settings key of the pre-split single-blob store
pub const LEGACY_FILTERS_KEY: &str = "customSearchFilters";

/// Store for global-scope filters
#[derive(Clone)]
pub struct GlobalFilterStore {
    settings: Arc<dyn SettingsStore>,
}

impl std::fmt::Debug for GlobalFilterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalFilterStore").finish_non_exhaustive()
    }
}

impl GlobalFilterStore {
    /// Create a store over the given settings namespace
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Load all global filters
    ///
    /// Filters without an entry in the enabled map are enabled. Returns an
    /// empty list if the namespace cannot be read or decoded.
    #[must_use]
    pub fn load(&self) -> Vec<SearchFilter> {
        self.try_load().unwrap_or_else(|e| {
            error!(error = %e, "Failed to load global filters");
            Vec::new()
        })
    }

    /// Load all global filters, reporting failures
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if either key cannot be read or decoded, or the
    /// enabled map is not an object.
    pub fn try_load(&self) -> Result<Vec<SearchFilter>, FilterError> {
        let definitions: Vec<FilterDefinition> = match self.settings.get(GLOBAL_FILTERS_KEY)? {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| FilterError::malformed_key(GLOBAL_FILTERS_KEY, &e))?,
        };

        // Only an explicit `false` disables; other values count as absent.
        let enabled: HashMap<String, Value> = match self.settings.get(GLOBAL_FILTERS_ENABLED_KEY)? {
            None | Some(Value::Null) => HashMap::new(),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| FilterError::malformed_key(GLOBAL_FILTERS_ENABLED_KEY, &e))?,
        };

        Ok(definitions
            .into_iter()
            .map(|def| {
                let flag = !matches!(enabled.get(&def.name), Some(Value::Bool(false)));
                def.into_filter(FilterScope::Global, Some(flag))
            })
            .collect())
    }

    /// Save the global subset of `filters`, replacing what is stored
    ///
    /// Returns `false` on failure; the failure is logged.
    #[must_use]
    pub fn save(&self, filters: &[SearchFilter]) -> bool {
        match self.try_save(filters) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to save global filters");
                false
            }
        }
    }

    /// Save the global subset of `filters`, reporting failures
    ///
    /// Definitions and enabled flags are written in one settings update.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if the settings namespace rejects the write.
    pub fn try_save(&self, filters: &[SearchFilter]) -> Result<(), FilterError> {
        let globals: Vec<&SearchFilter> = filters
            .iter()
            .filter(|f| f.scope == FilterScope::Global)
            .collect();

        let definitions: Vec<FilterDefinition> = globals.iter().map(|f| f.definition()).collect();
        let enabled: Map<String, Value> = globals
            .iter()
            .map(|f| (f.name.clone(), Value::Bool(f.is_enabled())))
            .collect();

        self.settings.set_many(vec![
            (GLOBAL_FILTERS_KEY.to_string(), serde_json::to_value(definitions)?),
            (GLOBAL_FILTERS_ENABLED_KEY.to_string(), Value::Object(enabled)),
        ])?;

        debug!(count = globals.len(), "Saved global filters");
        Ok(())
    }

    /// Read the legacy single-blob store
    ///
    /// Returns an empty list when the blob is absent or malformed.
    #[must_use]
    pub fn load_legacy(&self) -> Vec<SearchFilter> {
        let value = match self.settings.get(LEGACY_FILTERS_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!(error = %e, "Failed to read legacy filters");
                return Vec::new();
            }
        };

        if value.is_null() {
            return Vec::new();
        }

        serde_json::from_value(value).unwrap_or_else(|e| {
            let err = FilterError::malformed_key(LEGACY_FILTERS_KEY, &e);
            error!(error = %err, "Ignoring legacy filters");
            Vec::new()
        })
    }

    /// Copy legacy filters into the global store, once
    ///
    /// A no-op when the global store already holds at least one filter. Every
    /// legacy filter lands as a global filter; a missing enabled flag becomes
    /// `true`. The legacy blob is left untouched.
    ///
    /// Returns the number of filters migrated (0 for a no-op, an unreadable
    /// global store, or a failed save).
    #[must_use]
    pub fn migrate_legacy(&self, legacy: &[SearchFilter]) -> usize {
        match self.try_load() {
            Ok(existing) if !existing.is_empty() => {
                debug!("Global filters present, skipping legacy migration");
                return 0;
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "Global filters unreadable, skipping legacy migration");
                return 0;
            }
        }
        if legacy.is_empty() {
            return 0;
        }

        let migrated: Vec<SearchFilter> = legacy
            .iter()
            .cloned()
            .map(|f| {
                let enabled = f.is_enabled();
                f.with_scope(FilterScope::Global).with_enabled(enabled)
            })
            .collect();

        if self.save(&migrated) {
            info!(count = migrated.len(), "Migrated legacy filters to global store");
            migrated.len()
        } else {
            0
        }
    }

    /// Delete the global filter named `name`
    ///
    /// Returns `false` if nothing was removed or the save failed.
    #[must_use]
    pub fn delete(&self, name: &str) -> bool {
        let mut filters = match self.try_load() {
            Ok(filters) => filters,
            Err(e) => {
                error!(error = %e, filter = %name, "Failed to load global filters for delete");
                return false;
            }
        };

        let before = filters.len();
        filters.retain(|f| f.name != name);
        if filters.len() == before {
            debug!(filter = %name, "Global filter not found for delete");
            return false;
        }

        self.save(&filters)
    }

    /// Replace the filter named `original_name` with `filter`
    ///
    /// Keeps the original position and drops any other record already named
    /// like `filter`, all in one save.
    #[must_use]
    pub fn replace(&self, original_name: &str, filter: SearchFilter) -> bool {
        let mut filters = match self.try_load() {
            Ok(filters) => filters,
            Err(e) => {
                error!(error = %e, filter = %original_name, "Failed to load global filters for update");
                return false;
            }
        };

        let filter = filter.with_scope(FilterScope::Global);
        if !super::replace_record(&mut filters, original_name, filter) {
            debug!(filter = %original_name, "Global filter not found for update");
            return false;
        }

        self.save(&filters)
    }

    /// Flip the enabled flag of one global filter
    #[must_use]
    pub fn set_enabled(&self, name: &str, enabled: bool) -> bool {
        let mut filters = match self.try_load() {
            Ok(filters) => filters,
            Err(e) => {
                error!(error = %e, filter = %name, "Failed to load global filters");
                return false;
            }
        };

        let Some(filter) = filters.iter_mut().find(|f| f.name == name) else {
            return false;
        };
        filter.enabled = Some(enabled);

        self.save(&filters)
    }
}
