//! Append folders and file types to an existing filter

use super::add::workspace_relative;
use super::{Context, Outcome};
use crate::filters::{FilterScope, SearchFilter};
use crate::patterns::{append_patterns, extension_pattern, folder_pattern};
use crate::Result;
use std::path::PathBuf;

/// Append folder and extension patterns to a filter's include (or exclude)
///
/// Without a target name the user picks one of the saved filters. When every
/// pattern is already present the filter is left alone and `NoChanges` is
/// returned.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn append(
    ctx: &Context<'_>,
    target: Option<&str>,
    scope: Option<FilterScope>,
    folders: &[PathBuf],
    extensions: &[String],
    to_exclude: bool,
) -> Result<Outcome> {
    let candidates: Vec<String> = folders
        .iter()
        .map(|folder| folder_pattern(&workspace_relative(ctx, folder)))
        .chain(extensions.iter().map(|ext| extension_pattern(ext)))
        .collect();
    if candidates.is_empty() {
        ctx.output.error("Nothing to append: give at least one folder or file type");
        return Ok(Outcome::Failed);
    }

    let filter = if let Some(name) = target {
        selected!(ctx.select_by_name(name, scope))
    } else {
        let mut filters = ctx.registry.load_all();
        if let Some(scope) = scope {
            filters.retain(|f| f.scope == scope);
        }
        if filters.is_empty() {
            ctx.output.info("No saved filters to append to");
            return Ok(Outcome::NoChanges);
        }
        ask!(ctx.pick("Append to filter", filters))
    };

    let field = if to_exclude { &filter.exclude } else { &filter.include };
    let appended = append_patterns(field, &candidates);
    if !appended.changed {
        let side = if to_exclude { "excludes" } else { "includes" };
        ctx.output
            .info(&format!("No changes: '{}' already {side} these patterns", filter.name));
        return Ok(Outcome::NoChanges);
    }

    let key = filter.key();
    let updated = if to_exclude {
        SearchFilter {
            exclude: appended.patterns,
            ..filter
        }
    } else {
        SearchFilter {
            include: appended.patterns,
            ..filter
        }
    };
    ctx.update(&key, updated)
}
