//! Filter data structures
//!
//! - `SearchFilter`: a named include/exclude pattern pair with its scope
//! - `FilterDefinition`: the at-rest record written by both stores
//! - `FilterScope` / `FilterKey`: where a filter lives and how it is identified

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a filter is stored and visible
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterScope {
    /// Stored in the host settings namespace, visible in every workspace
    #[default]
    Global,
    /// Stored in the workspace file, visible only in that workspace
    Workspace,
}

impl FilterScope {
    /// Both scopes, in registry order
    pub const ALL: [Self; 2] = [Self::Global, Self::Workspace];

    /// Lowercase label used in files and messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Workspace => "workspace",
        }
    }
}

impl fmt::Display for FilterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a filter in the merged registry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub name: String,
    pub scope: FilterScope,
}

impl FilterKey {
    #[must_use]
    pub fn new(name: impl Into<String>, scope: FilterScope) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.scope)
    }
}

/// A saved search filter
///
/// `include` and `exclude` are comma-joined glob lists and may be empty.
/// `enabled` only matters for global filters; `None` reads as enabled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFilter {
    pub name: String,

    #[serde(default)]
    pub include: String,

    #[serde(default)]
    pub exclude: String,

    #[serde(default)]
    pub scope: FilterScope,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl SearchFilter {
    /// Create a global filter with no explicit enabled flag
    #[must_use]
    pub fn new(name: impl Into<String>, include: impl Into<String>, exclude: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            include: include.into(),
            exclude: exclude.into(),
            scope: FilterScope::Global,
            enabled: None,
        }
    }

    /// Set the scope
    #[must_use]
    pub const fn with_scope(mut self, scope: FilterScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the enabled flag
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Identity of this filter
    #[must_use]
    pub fn key(&self) -> FilterKey {
        FilterKey::new(self.name.clone(), self.scope)
    }

    /// Whether this filter has the given identity
    #[must_use]
    pub fn is(&self, name: &str, scope: FilterScope) -> bool {
        self.name == name && self.scope == scope
    }

    /// Whether the filter is enabled (missing flag means enabled)
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }

    /// Whether the filter shows up in selection lists
    ///
    /// Workspace filters are always visible; global filters unless disabled.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        match self.scope {
            FilterScope::Workspace => true,
            FilterScope::Global => self.is_enabled(),
        }
    }

    /// At-rest representation (name, include, exclude)
    #[must_use]
    pub fn definition(&self) -> FilterDefinition {
        FilterDefinition {
            name: self.name.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
        }
    }

    /// One-line label used in pickers
    #[must_use]
    pub fn label(&self) -> String {
        let mut label = format!("{} [{}]", self.name, self.scope);
        if self.scope == FilterScope::Global && !self.is_enabled() {
            label.push_str(" (disabled)");
        }
        label
    }
}

/// At-rest filter record
///
/// This is what `globalFilters` and the workspace file hold. Unknown fields
/// (such as a historical `scope`) are ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterDefinition {
    pub name: String,

    #[serde(default)]
    pub include: String,

    #[serde(default)]
    pub exclude: String,
}

impl FilterDefinition {
    /// Lift into a `SearchFilter` of the given scope
    #[must_use]
    pub fn into_filter(self, scope: FilterScope, enabled: Option<bool>) -> SearchFilter {
        SearchFilter {
            name: self.name,
            include: self.include,
            exclude: self.exclude,
            scope,
            enabled,
        }
    }
}

/// Validate a filter name
///
/// Names must be non-empty after trimming. Returns the trimmed name.
///
/// # Errors
///
/// Returns an error message if the name is blank.
pub fn validate_filter_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Filter name cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// Keep only the visible filters, in order
#[must_use]
pub fn visible_filters(filters: Vec<SearchFilter>) -> Vec<SearchFilter> {
    filters.into_iter().filter(SearchFilter::is_visible).collect()
}
