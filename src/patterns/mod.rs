//! Pattern combinator - merge and dedup logic for comma-joined glob lists.
//!
//! Filters keep their include/exclude patterns as flat comma-separated
//! strings. They are only split into ordered sets of trimmed, non-empty
//! patterns while appending.

use std::path::{Component, Path};

/// Separator used between patterns at rest
pub const PATTERN_SEPARATOR: char = ',';

/// Result of appending a batch of candidate patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// The resulting comma-joined pattern string
    pub patterns: String,
    /// Whether any candidate was actually added
    pub changed: bool,
}

/// Split a comma-joined pattern string into trimmed, non-empty patterns.
///
/// The result is an ordered set: later duplicates are dropped.
#[must_use]
pub fn split_patterns(patterns: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for part in patterns.split(PATTERN_SEPARATOR).map(str::trim) {
        if !part.is_empty() && !parts.iter().any(|p| p == part) {
            parts.push(part.to_string());
        }
    }
    parts
}

/// Append a single pattern to an existing comma-joined list.
///
/// A blank `existing` yields `to_add` as-is. If `to_add` is already present
/// (exact match after trimming the existing entries) the input is returned
/// unchanged. Otherwise the existing list is normalised (trimmed, empty
/// segments and duplicates dropped) and `to_add` is placed at the end.
#[must_use]
pub fn append_pattern(existing: &str, to_add: &str) -> String {
    if existing.trim().is_empty() {
        return to_add.to_string();
    }

    let mut parts = split_patterns(existing);
    if parts.iter().any(|p| p == to_add) {
        return existing.to_string();
    }

    parts.push(to_add.to_string());
    parts.join(",")
}

/// Append every candidate in order, tracking whether anything changed.
///
/// When all candidates are already present the outcome carries the input
/// string untouched and `changed == false`; callers report "no changes"
/// instead of saving.
#[must_use]
pub fn append_patterns<S: AsRef<str>>(existing: &str, candidates: &[S]) -> AppendOutcome {
    let mut patterns = existing.to_string();
    let mut changed = false;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        if candidate.trim().is_empty() {
            continue;
        }
        let next = append_pattern(&patterns, candidate);
        if next != patterns {
            changed = true;
            patterns = next;
        }
    }

    AppendOutcome { patterns, changed }
}

/// Discard any existing patterns and join the candidates in input order.
///
/// Duplicates are kept; the candidate list is caller-controlled.
#[must_use]
pub fn overwrite_patterns<S: AsRef<str>>(candidates: &[S]) -> String {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the include pattern matching everything under `folder`.
///
/// `folder` is expected to be relative to the workspace root. Separators are
/// normalised to `/`. The root itself (empty path or `.`) maps to `**`.
#[must_use]
pub fn folder_pattern(folder: &Path) -> String {
    let segments: Vec<String> = folder
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        "**".to_string()
    } else {
        format!("{}/**", segments.join("/"))
    }
}

/// Build the include pattern matching every file with extension `ext`.
///
/// Accepts `rs`, `.rs` and `*.rs` alike.
#[must_use]
pub fn extension_pattern(ext: &str) -> String {
    let ext = ext.trim();
    let ext = ext
        .strip_prefix("*.")
        .or_else(|| ext.strip_prefix('.'))
        .unwrap_or(ext);
    format!("**/*.{ext}")
}

/// Whether the `glob` crate accepts `pattern`.
///
/// Used for warnings only; stored patterns stay opaque strings.
#[must_use]
pub fn is_valid_glob(pattern: &str) -> bool {
    glob::Pattern::new(pattern).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_append_to_empty_returns_pattern() {
        assert_eq!(append_pattern("", "src/**"), "src/**");
        assert_eq!(append_pattern("   ", "src/**"), "src/**");
    }

    #[test]
    fn test_append_present_pattern_is_noop() {
        let existing = "src/**, docs/**";
        assert_eq!(append_pattern(existing, "docs/**"), existing);
    }

    #[test]
    fn test_append_absent_pattern_normalises_and_appends() {
        let result = append_pattern(" src/** ,, docs/** ,", "**/*.ts");
        assert_eq!(result, "src/**,docs/**,**/*.ts");
        assert_eq!(split_patterns(&result).iter().filter(|p| *p == "**/*.ts").count(), 1);
    }

    #[test]
    fn test_append_collapses_existing_duplicates() {
        assert_eq!(append_pattern("a, a,c", "b"), "a,c,b");
        assert_eq!(split_patterns("x,,x , y"), vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_append_patterns_tracks_changes() {
        let outcome = append_patterns("src/**", &["src/**", "lib/**"]);
        assert!(outcome.changed);
        assert_eq!(outcome.patterns, "src/**,lib/**");

        let unchanged = append_patterns("src/**, lib/**", &["lib/**", "src/**"]);
        assert!(!unchanged.changed);
        assert_eq!(unchanged.patterns, "src/**, lib/**");
    }

    #[test]
    fn test_append_patterns_from_empty() {
        let outcome = append_patterns("", &["**/*.rs", "**/*.toml", "**/*.rs"]);
        assert!(outcome.changed);
        assert_eq!(outcome.patterns, "**/*.rs,**/*.toml");
    }

    #[test]
    fn test_overwrite_keeps_order_and_duplicates() {
        assert_eq!(overwrite_patterns(&["**/*.ts", "**/*.js", "**/*.ts"]), "**/*.ts,**/*.js,**/*.ts");
        assert_eq!(overwrite_patterns::<&str>(&[]), "");
    }

    #[test]
    fn test_folder_pattern() {
        assert_eq!(folder_pattern(&PathBuf::from("src/components/")), "src/components/**");
        assert_eq!(folder_pattern(&PathBuf::from("./docs")), "docs/**");
        assert_eq!(folder_pattern(&PathBuf::from(".")), "**");
    }

    #[test]
    fn test_extension_pattern() {
        assert_eq!(extension_pattern("rs"), "**/*.rs");
        assert_eq!(extension_pattern(".ts"), "**/*.ts");
        assert_eq!(extension_pattern("*.md"), "**/*.md");
    }

    #[test]
    fn test_is_valid_glob() {
        assert!(is_valid_glob("src/**/*.rs"));
        assert!(!is_valid_glob("src/[abc"));
    }
}
