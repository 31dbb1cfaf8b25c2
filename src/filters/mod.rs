//! Filter storage module
//!
//! Saved search filters pair a comma-joined include glob list with an exclude
//! glob list under a name. Each filter has a scope:
//!
//! - **global** filters live in the host settings namespace (`GlobalFilterStore`)
//! - **workspace** filters live in `.vscode/custom-search-filters.json` under
//!   the workspace root (`WorkspaceFilterStore`)
//!
//! `FilterRegistry` merges both into one ordered collection (global first)
//! and routes every write to the store that owns the record.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use search_filters::filters::{FilterRegistry, FilterScope, FixedDecisions, SearchFilter};
//! use search_filters::settings::JsonFileSettings;
//!
//! let settings = Arc::new(JsonFileSettings::new(PathBuf::from("settings.json")));
//! let registry = FilterRegistry::new(settings, Some(PathBuf::from(".")));
//!
//! let filter = SearchFilter::new("frontend", "src/web/**", "**/*.snap");
//! let outcome = registry.save(filter, Some(FilterScope::Workspace), &FixedDecisions::overwrite());
//! assert!(outcome.succeeded());
//! ```

pub mod error;
pub mod global;
pub mod registry;
pub mod types;
pub mod workspace;

pub use error::FilterError;
pub use global::GlobalFilterStore;
pub use registry::{FilterRegistry, FixedDecisions, SaveDelegate, SaveOutcome};
pub use types::{
    FilterDefinition, FilterKey, FilterScope, SearchFilter, validate_filter_name, visible_filters,
};
pub use workspace::WorkspaceFilterStore;

/// Replace the record named `original_name` with `filter` inside one store's list
///
/// The new record takes the original's position; any other record already
/// using the new name is dropped. Returns `false` if `original_name` is absent.
pub(crate) fn replace_record(
    filters: &mut Vec<SearchFilter>,
    original_name: &str,
    filter: SearchFilter,
) -> bool {
    let Some(pos) = filters.iter().position(|f| f.name == original_name) else {
        return false;
    };

    let new_name = filter.name.clone();
    filters[pos] = filter;

    let mut index = 0;
    filters.retain(|f| {
        let keep = index == pos || f.name != new_name;
        index += 1;
        keep
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(filters: &[SearchFilter]) -> Vec<&str> {
        filters.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_replace_record_keeps_position() {
        let mut filters = vec![
            SearchFilter::new("A", "", ""),
            SearchFilter::new("B", "", ""),
            SearchFilter::new("C", "", ""),
        ];
        assert!(replace_record(&mut filters, "B", SearchFilter::new("B2", "x", "")));
        assert_eq!(names(&filters), vec!["A", "B2", "C"]);
        assert_eq!(filters[1].include, "x");
    }

    #[test]
    fn test_replace_record_drops_colliding_entry() {
        let mut filters = vec![
            SearchFilter::new("A", "", ""),
            SearchFilter::new("B", "", ""),
            SearchFilter::new("C", "", ""),
        ];
        assert!(replace_record(&mut filters, "C", SearchFilter::new("A", "new", "")));
        assert_eq!(names(&filters), vec!["B", "A"]);
        assert_eq!(filters[1].include, "new");
    }

    #[test]
    fn test_replace_record_missing_original() {
        let mut filters = vec![SearchFilter::new("A", "", "")];
        assert!(!replace_record(&mut filters, "Z", SearchFilter::new("Z", "", "")));
        assert_eq!(names(&filters), vec!["A"]);
    }
}
