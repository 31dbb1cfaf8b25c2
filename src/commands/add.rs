//! Filter creation commands
//!
//! - `add`: a filter from typed include/exclude patterns
//! - `add_folder`: a filter matching everything under one folder
//! - `add_file_type`: a filter (or an existing filter's include) for file extensions

use super::{Context, Outcome};
use crate::filters::{FilterScope, SearchFilter};
use crate::patterns::{append_patterns, extension_pattern, folder_pattern, overwrite_patterns, split_patterns};
use crate::Result;
use std::path::{Path, PathBuf};

const APPEND_CHOICE: &str = "Append to existing patterns";
const OVERWRITE_CHOICE: &str = "Overwrite existing patterns";

/// Create a filter, prompting for anything not supplied
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn add(
    ctx: &Context<'_>,
    name: Option<&str>,
    include: Option<&str>,
    exclude: Option<&str>,
    scope: Option<FilterScope>,
) -> Result<Outcome> {
    let name = ask!(ctx.name_or_prompt(name, None));
    let Some(name) = ctx.checked_name(&name) else {
        return Ok(Outcome::Failed);
    };
    let include = ask!(ctx.text_or_prompt(include, "Include patterns (comma separated)", None));
    let exclude = ask!(ctx.text_or_prompt(exclude, "Exclude patterns (comma separated)", None));

    ctx.warn_invalid_globs(&include);
    ctx.warn_invalid_globs(&exclude);
    ctx.save(SearchFilter::new(name, include, exclude), scope)
}

/// Create a filter including everything under `folder`
///
/// The name defaults to the folder's own name.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn add_folder(
    ctx: &Context<'_>,
    folder: &Path,
    name: Option<&str>,
    scope: Option<FilterScope>,
) -> Result<Outcome> {
    let relative = workspace_relative(ctx, folder);
    let include = folder_pattern(&relative);

    let default_name = relative
        .file_name()
        .or_else(|| ctx.registry.workspace().root().and_then(Path::file_name))
        .map(|n| n.to_string_lossy().into_owned());

    let name = ask!(ctx.name_or_prompt(name, default_name.as_deref()));
    let Some(name) = ctx.checked_name(&name) else {
        return Ok(Outcome::Failed);
    };
    ctx.save(SearchFilter::new(name, include, ""), scope)
}

/// Build a filter from file extensions, or fold them into an existing filter
///
/// Without `into`, a new filter is created. With a target, the user picks
/// between appending to and overwriting its include patterns; appending is
/// only offered when it would change something.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn add_file_type(
    ctx: &Context<'_>,
    extensions: &[String],
    into: Option<&str>,
    name: Option<&str>,
    scope: Option<FilterScope>,
) -> Result<Outcome> {
    let extensions = if extensions.is_empty() {
        split_patterns(&ask!(ctx.input.prompt_text(
            "File extensions (comma separated)",
            None,
            false
        )))
    } else {
        extensions.to_vec()
    };
    let candidates: Vec<String> = extensions.iter().map(|e| extension_pattern(e)).collect();
    if candidates.is_empty() {
        ctx.output.error("No file extensions given");
        return Ok(Outcome::Failed);
    }

    let Some(target) = into else {
        let name = ask!(ctx.name_or_prompt(name, None));
        let Some(name) = ctx.checked_name(&name) else {
            return Ok(Outcome::Failed);
        };
        return ctx.save(SearchFilter::new(name, overwrite_patterns(&candidates), ""), scope);
    };

    let target = selected!(ctx.select_by_name(target, scope));
    let appended = append_patterns(&target.include, &candidates);

    let mut choices = Vec::new();
    if appended.changed {
        choices.push(APPEND_CHOICE.to_string());
    } else {
        ctx.output
            .info(&format!("No changes: '{}' already includes these file types", target.name));
    }
    choices.push(OVERWRITE_CHOICE.to_string());

    let prompt = format!("Update include patterns of '{}'", target.name);
    let choice = ask!(ctx.input.prompt_select(&prompt, &choices, Some(0)));
    let include = if choices.get(choice).map(String::as_str) == Some(APPEND_CHOICE) {
        appended.patterns
    } else {
        overwrite_patterns(&candidates)
    };

    if include == target.include {
        ctx.output.info(&format!("Filter '{}' is unchanged", target.name));
        return Ok(Outcome::NoChanges);
    }

    let key = target.key();
    ctx.update(&key, SearchFilter { include, ..target })
}

/// Express `folder` relative to the workspace root when it lies inside it
pub(crate) fn workspace_relative(ctx: &Context<'_>, folder: &Path) -> PathBuf {
    ctx.registry
        .workspace()
        .root()
        .and_then(|root| folder.strip_prefix(root).ok())
        .map_or_else(|| folder.to_path_buf(), Path::to_path_buf)
}
