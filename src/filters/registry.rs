//! Filter registry
//!
//! Presents the global and workspace stores as one ordered collection and
//! routes each write to the store owning the record. The registry keeps no
//! state of its own.

use super::error::FilterError;
use super::global::GlobalFilterStore;
use super::types::{FilterKey, FilterScope, SearchFilter, visible_filters};
use super::workspace::WorkspaceFilterStore;
use crate::settings::SettingsStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Decisions the registry cannot make on its own during a save
///
/// Implemented over the interactive prompt surface by the command layer,
/// and with fixed answers in tests and non-interactive hosts.
pub trait SaveDelegate {
    /// Ask which scope a new filter goes to; `None` cancels the save
    fn choose_scope(&self, filter: &SearchFilter) -> Option<FilterScope>;

    /// Ask whether `existing` may be overwritten
    fn confirm_overwrite(&self, existing: &SearchFilter) -> bool;
}

/// Delegate with predetermined answers
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDecisions {
    /// Scope returned by `choose_scope` (`None` cancels)
    pub scope: Option<FilterScope>,
    /// Answer returned by `confirm_overwrite`
    pub overwrite: bool,
}

impl FixedDecisions {
    /// Never overwrite, cancel when a scope is needed
    #[must_use]
    pub const fn decline() -> Self {
        Self {
            scope: None,
            overwrite: false,
        }
    }

    /// Always overwrite, pick global when a scope is needed
    #[must_use]
    pub const fn overwrite() -> Self {
        Self {
            scope: Some(FilterScope::Global),
            overwrite: true,
        }
    }
}

impl SaveDelegate for FixedDecisions {
    fn choose_scope(&self, _filter: &SearchFilter) -> Option<FilterScope> {
        self.scope
    }

    fn confirm_overwrite(&self, _existing: &SearchFilter) -> bool {
        self.overwrite
    }
}

/// Result of a registry write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The record was written
    Saved,
    /// No scope was chosen
    Cancelled,
    /// A record with the same name and scope exists and overwrite was declined
    Declined,
    /// The backing store failed, or the record to edit does not exist
    Failed,
}

impl SaveOutcome {
    /// Whether the write happened
    #[must_use]
    pub const fn succeeded(self) -> bool {
        matches!(self, Self::Saved)
    }

    const fn from_store(ok: bool) -> Self {
        if ok { Self::Saved } else { Self::Failed }
    }
}

/// Merged view over the global and workspace filter stores
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    global: GlobalFilterStore,
    workspace: WorkspaceFilterStore,
}

impl FilterRegistry {
    /// Build a registry over a settings namespace and an optional workspace root
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsStore>, workspace_root: Option<PathBuf>) -> Self {
        Self::from_stores(
            GlobalFilterStore::new(settings),
            WorkspaceFilterStore::new(workspace_root),
        )
    }

    /// Build a registry from existing stores
    #[must_use]
    pub const fn from_stores(global: GlobalFilterStore, workspace: WorkspaceFilterStore) -> Self {
        Self { global, workspace }
    }

    /// The global store
    #[must_use]
    pub const fn global(&self) -> &GlobalFilterStore {
        &self.global
    }

    /// The workspace store
    #[must_use]
    pub const fn workspace(&self) -> &WorkspaceFilterStore {
        &self.workspace
    }

    /// All filters: global first, then workspace, in stored order
    #[must_use]
    pub fn load_all(&self) -> Vec<SearchFilter> {
        let mut filters = self.global.load();
        filters.extend(self.workspace.load());
        filters
    }

    /// Filters offered for selection (disabled global filters hidden)
    #[must_use]
    pub fn load_visible(&self) -> Vec<SearchFilter> {
        visible_filters(self.load_all())
    }

    /// Filters of one scope
    #[must_use]
    pub fn load_scope(&self, scope: FilterScope) -> Vec<SearchFilter> {
        match scope {
            FilterScope::Global => self.global.load(),
            FilterScope::Workspace => self.workspace.load(),
        }
    }

    /// Filters of one scope, reporting read and decode failures
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if the scope's store cannot be read or decoded.
    pub fn try_load_scope(&self, scope: FilterScope) -> Result<Vec<SearchFilter>, FilterError> {
        match scope {
            FilterScope::Global => self.global.try_load(),
            FilterScope::Workspace => self.workspace.try_load(),
        }
    }

    /// Find a filter by identity
    #[must_use]
    pub fn find(&self, key: &FilterKey) -> Option<SearchFilter> {
        self.load_scope(key.scope)
            .into_iter()
            .find(|f| f.name == key.name)
    }

    /// All filters with the given name, across scopes
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Vec<SearchFilter> {
        self.load_all().into_iter().filter(|f| f.name == name).collect()
    }

    /// Resolve the scope a write goes to
    ///
    /// An explicit scope wins, then the record's current scope, then the
    /// delegate (the prompt). `None` means the user gave no answer.
    pub fn resolve_scope(
        filter: &SearchFilter,
        current: Option<FilterScope>,
        explicit: Option<FilterScope>,
        delegate: &dyn SaveDelegate,
    ) -> Option<FilterScope> {
        explicit.or(current).or_else(|| delegate.choose_scope(filter))
    }

    /// Save a filter
    ///
    /// The scope comes from `explicit_scope`, otherwise the delegate is asked.
    /// A record with the same name in the same scope is only replaced after
    /// the delegate confirms; filters in the other scope never collide.
    pub fn save(
        &self,
        filter: SearchFilter,
        explicit_scope: Option<FilterScope>,
        delegate: &dyn SaveDelegate,
    ) -> SaveOutcome {
        self.save_with_current(filter, None, explicit_scope, delegate)
    }

    /// Save a filter that already has a scope (an existing record)
    pub fn save_existing(
        &self,
        filter: SearchFilter,
        explicit_scope: Option<FilterScope>,
        delegate: &dyn SaveDelegate,
    ) -> SaveOutcome {
        let current = filter.scope;
        self.save_with_current(filter, Some(current), explicit_scope, delegate)
    }

    fn save_with_current(
        &self,
        filter: SearchFilter,
        current: Option<FilterScope>,
        explicit_scope: Option<FilterScope>,
        delegate: &dyn SaveDelegate,
    ) -> SaveOutcome {
        let Some(scope) = Self::resolve_scope(&filter, current, explicit_scope, delegate) else {
            debug!(filter = %filter.name, "Save cancelled, no scope chosen");
            return SaveOutcome::Cancelled;
        };

        let mut filter = filter.with_scope(scope);
        if scope == FilterScope::Workspace {
            filter.enabled = None;
        }

        let mut stored = match self.try_load_scope(scope) {
            Ok(stored) => stored,
            Err(e) => {
                error!(error = %e, filter = %filter.key(), "Stored filters unreadable, refusing to save");
                return SaveOutcome::Failed;
            }
        };
        if let Some(pos) = stored.iter().position(|f| f.name == filter.name) {
            if !delegate.confirm_overwrite(&stored[pos]) {
                debug!(filter = %filter.key(), "Overwrite declined");
                return SaveOutcome::Declined;
            }
            if scope == FilterScope::Global && filter.enabled.is_none() {
                filter.enabled = stored[pos].enabled;
            }
            stored[pos] = filter.clone();
        } else {
            stored.push(filter.clone());
        }

        let outcome = SaveOutcome::from_store(self.write_scope(scope, &stored));
        if outcome.succeeded() {
            info!(filter = %filter.key(), "Saved filter");
        }
        outcome
    }

    /// Edit the filter identified by `original`
    ///
    /// The scope stays the original's. When the name changes and another
    /// record of that scope already has the new name, the delegate must
    /// confirm the overwrite. The old entry is removed in the same write.
    pub fn edit(
        &self,
        original: &FilterKey,
        updated: SearchFilter,
        delegate: &dyn SaveDelegate,
    ) -> SaveOutcome {
        let Some(existing) = self.find(original) else {
            warn!(filter = %original, "Filter to edit not found");
            return SaveOutcome::Failed;
        };

        let mut updated = updated.with_scope(original.scope);
        if updated.name != original.name {
            let target = FilterKey::new(updated.name.clone(), original.scope);
            if let Some(colliding) = self.find(&target) {
                if !delegate.confirm_overwrite(&colliding) {
                    debug!(filter = %target, "Rename overwrite declined");
                    return SaveOutcome::Declined;
                }
            }
        }

        let ok = match original.scope {
            FilterScope::Global => {
                if updated.enabled.is_none() {
                    updated.enabled = existing.enabled;
                }
                self.global.replace(&original.name, updated.clone())
            }
            FilterScope::Workspace => self.workspace.replace(&original.name, updated.clone()),
        };

        let outcome = SaveOutcome::from_store(ok);
        if outcome.succeeded() {
            info!(from = %original, to = %updated.key(), "Updated filter");
        }
        outcome
    }

    /// Delete a filter from the store that owns its scope
    #[must_use]
    pub fn delete(&self, filter: &SearchFilter) -> bool {
        let ok = match filter.scope {
            FilterScope::Global => self.global.delete(&filter.name),
            FilterScope::Workspace => self.workspace.delete(&filter.name),
        };
        if ok {
            info!(filter = %filter.key(), "Deleted filter");
        }
        ok
    }

    /// Enable or disable a global filter
    #[must_use]
    pub fn set_enabled(&self, name: &str, enabled: bool) -> bool {
        self.global.set_enabled(name, enabled)
    }

    /// Run the one-time migration from the legacy blob
    ///
    /// Returns the number of filters migrated.
    #[must_use]
    pub fn migrate_legacy(&self) -> usize {
        let legacy = self.global.load_legacy();
        self.global.migrate_legacy(&legacy)
    }

    fn write_scope(&self, scope: FilterScope, filters: &[SearchFilter]) -> bool {
        match scope {
            FilterScope::Global => self.global.save(filters),
            FilterScope::Workspace => self.workspace.save(filters),
        }
    }
}
