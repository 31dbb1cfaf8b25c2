//! Edit an existing filter in place

use super::{Context, Outcome};
use crate::filters::{FilterScope, SearchFilter};
use crate::Result;

/// Change a filter's name, include or exclude patterns
///
/// When none of the new values are given, each one is prompted for with the
/// current value prefilled, so it can be kept, changed or cleared. Otherwise missing values keep their current
/// value. The filter stays in its scope.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn edit(
    ctx: &Context<'_>,
    name: &str,
    scope: Option<FilterScope>,
    new_name: Option<&str>,
    include: Option<&str>,
    exclude: Option<&str>,
) -> Result<Outcome> {
    let current = selected!(ctx.select_by_name(name, scope));
    let interactive = new_name.is_none() && include.is_none() && exclude.is_none();

    let (new_name, include, exclude) = if interactive {
        (
            ask!(ctx.input.prompt_text("Filter name", Some(&current.name), false)),
            ask!(ctx.input.prompt_text("Include patterns", Some(&current.include), true)),
            ask!(ctx.input.prompt_text("Exclude patterns", Some(&current.exclude), true)),
        )
    } else {
        (
            new_name.unwrap_or(&current.name).to_string(),
            include.unwrap_or(&current.include).to_string(),
            exclude.unwrap_or(&current.exclude).to_string(),
        )
    };

    let Some(new_name) = ctx.checked_name(&new_name) else {
        return Ok(Outcome::Failed);
    };

    if new_name == current.name && include == current.include && exclude == current.exclude {
        ctx.output.info(&format!("Filter '{}' is unchanged", current.name));
        return Ok(Outcome::NoChanges);
    }

    ctx.warn_invalid_globs(&include);
    ctx.warn_invalid_globs(&exclude);

    let key = current.key();
    let updated = SearchFilter {
        name: new_name,
        include,
        exclude,
        ..current
    };
    ctx.update(&key, updated)
}
