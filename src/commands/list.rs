//! List and show saved filters

use super::{Context, Outcome};
use crate::filters::{FilterScope, SearchFilter};
use crate::Result;

/// List saved filters, global first
///
/// Disabled global filters are only listed with `all`.
///
/// # Errors
///
/// Currently infallible; returns `Result` like the other commands.
pub fn list(ctx: &Context<'_>, all: bool) -> Result<Outcome> {
    let filters = if all {
        ctx.registry.load_all()
    } else {
        ctx.registry.load_visible()
    };

    if filters.is_empty() {
        ctx.output.info("No saved filters.");
        ctx.output.info("Create one with: search-filters add <name>");
        return Ok(Outcome::Applied);
    }

    let max_name_len = filters.iter().map(|f| f.name.len()).max().unwrap_or(0);
    for filter in &filters {
        let mut line = format!(
            "{:<width$}  [{}]",
            filter.name,
            filter.scope,
            width = max_name_len
        );
        if filter.scope == FilterScope::Global && !filter.is_enabled() {
            line.push_str(" (disabled)");
        }
        ctx.output.write(&line);
        ctx.output.write(&format!(
            "{:<width$}  include: {}  exclude: {}",
            "",
            or_none(&filter.include),
            or_none(&filter.exclude),
            width = max_name_len
        ));
    }

    Ok(Outcome::Applied)
}

/// Show one filter in detail
///
/// # Errors
///
/// Returns an error if the scope picker fails.
pub fn show(ctx: &Context<'_>, name: &str, scope: Option<FilterScope>) -> Result<Outcome> {
    let filter = selected!(ctx.select_by_name(name, scope));
    for line in describe(ctx, &filter) {
        ctx.output.write(&line);
    }
    Ok(Outcome::Applied)
}

fn describe(ctx: &Context<'_>, filter: &SearchFilter) -> Vec<String> {
    let mut lines = vec![
        format!("Filter: {}", filter.name),
        format!("Scope: {}", filter.scope),
    ];
    match filter.scope {
        FilterScope::Global => {
            lines.push(format!("Enabled: {}", if filter.is_enabled() { "yes" } else { "no" }));
        }
        FilterScope::Workspace => {
            if let Some(path) = ctx.registry.workspace().file_path() {
                lines.push(format!("Stored in: {}", path.display()));
            }
        }
    }
    lines.push(format!("Include: {}", or_none(&filter.include)));
    lines.push(format!("Exclude: {}", or_none(&filter.exclude)));
    lines
}

fn or_none(patterns: &str) -> &str {
    if patterns.trim().is_empty() { "(none)" } else { patterns }
}
