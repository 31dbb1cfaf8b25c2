//! Delete filters and toggle global filters

use super::{Context, Outcome};
use crate::filters::{FilterKey, FilterScope};
use crate::Result;

/// Delete a filter, asking for confirmation unless `force` is set
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn delete(
    ctx: &Context<'_>,
    name: &str,
    scope: Option<FilterScope>,
    force: bool,
) -> Result<Outcome> {
    let filter = selected!(ctx.select_by_name(name, scope));

    if !force {
        let prompt = format!("Delete filter '{}'?", filter.label());
        if !ask!(ctx.input.prompt_confirm(&prompt, false)) {
            ctx.output.info("Cancelled");
            return Ok(Outcome::Aborted);
        }
    }

    if ctx.registry.delete(&filter) {
        ctx.output.success(&format!("Filter '{}' deleted", filter.name));
        Ok(Outcome::Applied)
    } else {
        ctx.output.error(&format!("Failed to delete filter '{}'", filter.name));
        Ok(Outcome::Failed)
    }
}

/// Enable or disable a global filter
///
/// Disabled filters stay stored but are hidden from the search picker.
/// Workspace filters cannot be toggled.
///
/// # Errors
///
/// Currently infallible; returns `Result` like the other commands.
pub fn set_enabled(ctx: &Context<'_>, name: &str, enabled: bool) -> Result<Outcome> {
    let verb = if enabled { "enabled" } else { "disabled" };

    let Some(filter) = ctx.registry.find(&FilterKey::new(name, FilterScope::Global)) else {
        if ctx.registry.find(&FilterKey::new(name, FilterScope::Workspace)).is_some() {
            ctx.output
                .error(&format!("'{name}' is a workspace filter; only global filters can be {verb}"));
        } else {
            ctx.output.error(&format!("Filter '{name}' not found"));
        }
        return Ok(Outcome::Failed);
    };

    if filter.is_enabled() == enabled {
        ctx.output.info(&format!("Filter '{name}' is already {verb}"));
        return Ok(Outcome::NoChanges);
    }

    if ctx.registry.set_enabled(name, enabled) {
        ctx.output.success(&format!("Filter '{name}' {verb}"));
        Ok(Outcome::Applied)
    } else {
        ctx.output.error(&format!("Failed to save filter '{name}'"));
        Ok(Outcome::Failed)
    }
}
