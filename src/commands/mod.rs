//! Command implementations
//!
//! Each command is a short prompt chain over a [`Context`]: ask for whatever
//! the caller did not supply, then hand the result to the registry. Any
//! cancelled prompt ends the chain with [`Outcome::Aborted`] and nothing is
//! written.

use crate::filters::{FilterKey, FilterRegistry, FilterScope, SaveDelegate, SaveOutcome, SearchFilter};
use crate::ui::{InputError, OutputWriter, UserInput};
use crate::Result;
use std::cell::RefCell;

/// Unwrap a prompt answer, or end the command as aborted when cancelled
macro_rules! ask {
    ($prompt:expr) => {
        match $prompt? {
            Some(value) => value,
            None => return Ok($crate::commands::Outcome::Aborted),
        }
    };
}

/// Unwrap a filter selection, or end the command with the selection's outcome
macro_rules! selected {
    ($selection:expr) => {
        match $selection? {
            Ok(filter) => filter,
            Err(outcome) => return Ok(outcome),
        }
    };
}

pub mod add;
pub mod append;
pub mod combine;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod migrate;
pub mod search;

pub use add::{add, add_file_type, add_folder};
pub use append::append;
pub use combine::combine;
pub use config::{config_get, config_set};
pub use delete::{delete, set_enabled};
pub use edit::edit;
pub use list::{list, show};
pub use migrate::migrate;
pub use search::search;

/// What a command ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked
    Applied,
    /// The command ran but there was nothing to change
    NoChanges,
    /// The user cancelled a prompt or declined an overwrite
    Aborted,
    /// The command could not complete
    Failed,
}

impl Outcome {
    /// Whether the host should report failure
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// A resolved filter, or the outcome to end the command with
pub type Selection = std::result::Result<SearchFilter, Outcome>;

/// Everything a command needs
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub registry: &'a FilterRegistry,
    pub input: &'a dyn UserInput,
    pub output: &'a dyn OutputWriter,
}

impl<'a> Context<'a> {
    #[must_use]
    pub fn new(
        registry: &'a FilterRegistry,
        input: &'a dyn UserInput,
        output: &'a dyn OutputWriter,
    ) -> Self {
        Self {
            registry,
            input,
            output,
        }
    }

    /// Save through the registry, prompting for scope and overwrite
    ///
    /// # Errors
    ///
    /// Returns an error if a prompt fails.
    pub fn save(&self, filter: SearchFilter, scope: Option<FilterScope>) -> Result<Outcome> {
        let name = filter.name.clone();
        let delegate = InteractiveDelegate::new(self.input, self.registry.workspace().root().is_some());
        let outcome = self.registry.save(filter, scope, &delegate);
        delegate.finish()?;
        Ok(self.report(outcome, &name, "saved"))
    }

    /// Replace the record identified by `original` with `updated`
    ///
    /// # Errors
    ///
    /// Returns an error if a prompt fails.
    pub fn update(&self, original: &FilterKey, updated: SearchFilter) -> Result<Outcome> {
        let name = updated.name.clone();
        let delegate = InteractiveDelegate::new(self.input, self.registry.workspace().root().is_some());
        let outcome = self.registry.edit(original, updated, &delegate);
        delegate.finish()?;
        Ok(self.report(outcome, &name, "updated"))
    }

    /// Turn a registry outcome into a notification
    pub(crate) fn report(&self, outcome: SaveOutcome, name: &str, verb: &str) -> Outcome {
        match outcome {
            SaveOutcome::Saved => {
                self.output.success(&format!("Filter '{name}' {verb}"));
                Outcome::Applied
            }
            SaveOutcome::Cancelled => Outcome::Aborted,
            SaveOutcome::Declined => {
                self.output.info(&format!("Filter '{name}' was not {verb}"));
                Outcome::Aborted
            }
            SaveOutcome::Failed => {
                self.output.error(&format!("Failed to save filter '{name}'"));
                Outcome::Failed
            }
        }
    }

    /// Resolve a filter by name
    ///
    /// With an explicit scope the record must exist in that scope. Without
    /// one, a name held by both scopes makes the user pick. A missing filter
    /// is reported and ends the command as `Failed`; a cancelled pick as
    /// `Aborted`.
    ///
    /// # Errors
    ///
    /// Returns an error if a prompt fails.
    pub fn select_by_name(&self, name: &str, scope: Option<FilterScope>) -> Result<Selection> {
        let mut matches = self.registry.find_by_name(name);
        if let Some(scope) = scope {
            matches.retain(|f| f.scope == scope);
        }

        match matches.len() {
            0 => {
                let label = scope.map_or_else(|| format!("'{name}'"), |s| format!("'{name}' ({s})"));
                self.output.error(&format!("Filter {label} not found"));
                Ok(Err(Outcome::Failed))
            }
            1 => Ok(matches.pop().ok_or(Outcome::Failed)),
            _ => Ok(self
                .pick(&format!("'{name}' exists in both scopes, pick one"), matches)?
                .ok_or(Outcome::Aborted)),
        }
    }

    /// Let the user pick one filter from `filters`
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt fails.
    pub fn pick(&self, prompt: &str, mut filters: Vec<SearchFilter>) -> Result<Option<SearchFilter>> {
        let labels: Vec<String> = filters.iter().map(SearchFilter::label).collect();
        let Some(index) = self.input.prompt_select(prompt, &labels, Some(0))? else {
            return Ok(None);
        };
        Ok((index < filters.len()).then(|| filters.swap_remove(index)))
    }

    /// Validate a name given on the command line or read from a prompt
    pub(crate) fn checked_name(&self, name: &str) -> Option<String> {
        match crate::filters::validate_filter_name(name) {
            Ok(name) => Some(name),
            Err(msg) => {
                self.output.error(&msg);
                None
            }
        }
    }

    /// Use `value` if given, otherwise ask (empty answers allowed)
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt fails.
    pub(crate) fn text_or_prompt(
        &self,
        value: Option<&str>,
        prompt: &str,
        initial: Option<&str>,
    ) -> Result<Option<String>> {
        match value {
            Some(value) => Ok(Some(value.to_string())),
            None => Ok(self.input.prompt_text(prompt, initial, true)?),
        }
    }

    /// Ask for a filter name unless one was given
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt fails.
    pub(crate) fn name_or_prompt(&self, name: Option<&str>, initial: Option<&str>) -> Result<Option<String>> {
        match name {
            Some(name) => Ok(Some(name.to_string())),
            None => Ok(self.input.prompt_text("Filter name", initial, false)?),
        }
    }

    /// Warn about patterns the glob syntax rejects
    pub(crate) fn warn_invalid_globs(&self, patterns: &str) {
        for pattern in crate::patterns::split_patterns(patterns) {
            if !crate::patterns::is_valid_glob(&pattern) {
                self.output.warning(&format!("'{pattern}' is not a valid glob pattern"));
            }
        }
    }
}

/// `SaveDelegate` that asks the user
///
/// The delegate interface cannot fail, so a prompt error is held until
/// [`InteractiveDelegate::finish`] and the pending decision counts as a
/// cancel.
pub struct InteractiveDelegate<'a> {
    input: &'a dyn UserInput,
    has_workspace: bool,
    error: RefCell<Option<InputError>>,
}

impl<'a> InteractiveDelegate<'a> {
    /// Create a delegate; without a workspace the scope is always global
    #[must_use]
    pub fn new(input: &'a dyn UserInput, has_workspace: bool) -> Self {
        Self {
            input,
            has_workspace,
            error: RefCell::new(None),
        }
    }

    /// Surface a prompt error raised during the save
    ///
    /// # Errors
    ///
    /// Returns the first prompt error, if any.
    pub fn finish(self) -> std::result::Result<(), InputError> {
        self.error.into_inner().map_or(Ok(()), Err)
    }

    fn hold<T>(&self, result: std::result::Result<Option<T>, InputError>) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(e) => {
                let mut slot = self.error.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                None
            }
        }
    }
}

impl SaveDelegate for InteractiveDelegate<'_> {
    fn choose_scope(&self, filter: &SearchFilter) -> Option<FilterScope> {
        if !self.has_workspace {
            return Some(FilterScope::Global);
        }
        let items: Vec<String> = FilterScope::ALL
            .iter()
            .map(|scope| match scope {
                FilterScope::Global => "Global (all workspaces)".to_string(),
                FilterScope::Workspace => "Workspace (this folder only)".to_string(),
            })
            .collect();
        let prompt = format!("Save filter '{}' to", filter.name);
        self.hold(self.input.prompt_select(&prompt, &items, Some(0)))
            .and_then(|index| FilterScope::ALL.get(index).copied())
    }

    fn confirm_overwrite(&self, existing: &SearchFilter) -> bool {
        let prompt = format!("Filter '{}' already exists. Overwrite?", existing.label());
        self.hold(self.input.prompt_confirm(&prompt, false))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestWorkspace;
    use crate::ui::mock::{Answer, MockInput};
    use crate::ui::MessageLevel;

    #[test]
    fn test_delegate_defaults_to_global_without_workspace() {
        let input = MockInput::new(vec![]);
        let delegate = InteractiveDelegate::new(&input, false);
        assert_eq!(
            delegate.choose_scope(&SearchFilter::new("A", "", "")),
            Some(FilterScope::Global)
        );
        assert!(input.prompts().is_empty());
    }

    #[test]
    fn test_delegate_scope_prompt_and_cancel() {
        let input = MockInput::new(vec![Answer::Select(1)]);
        let delegate = InteractiveDelegate::new(&input, true);
        assert_eq!(
            delegate.choose_scope(&SearchFilter::new("A", "", "")),
            Some(FilterScope::Workspace)
        );
        assert_eq!(delegate.choose_scope(&SearchFilter::new("A", "", "")), None);
        assert!(delegate.finish().is_ok());
    }

    #[test]
    fn test_delegate_overwrite_requires_explicit_yes() {
        let input = MockInput::new(vec![Answer::Confirm(true), Answer::Confirm(false), Answer::Cancel]);
        let delegate = InteractiveDelegate::new(&input, true);
        let existing = SearchFilter::new("Dup", "", "");
        assert!(delegate.confirm_overwrite(&existing));
        assert!(!delegate.confirm_overwrite(&existing));
        assert!(!delegate.confirm_overwrite(&existing));
    }

    #[test]
    fn test_select_by_name_picks_between_scopes() {
        let ws = TestWorkspace::new();
        for scope in FilterScope::ALL {
            ws.seed(SearchFilter::new("Shared", scope.as_str(), ""), scope);
        }

        let input = MockInput::new(vec![Answer::Select(1)]);
        let ctx = ws.context(&input);
        let picked = ctx.select_by_name("Shared", None).unwrap().unwrap();
        assert_eq!(picked.scope, FilterScope::Workspace);
        assert_eq!(input.prompts().len(), 1);

        let input = MockInput::cancelled();
        let ctx = ws.context(&input);
        assert_eq!(ctx.select_by_name("Shared", None).unwrap(), Err(Outcome::Aborted));
        assert_eq!(input.prompts().len(), 1);

        let input = MockInput::new(vec![]);
        let ctx = ws.context(&input);
        let picked = ctx.select_by_name("Shared", Some(FilterScope::Global)).unwrap().unwrap();
        assert_eq!(picked.include, "global");
        assert!(input.prompts().is_empty());
    }

    #[test]
    fn test_select_by_name_reports_missing() {
        let ws = TestWorkspace::new();
        let input = MockInput::new(vec![]);
        let ctx = ws.context(&input);
        assert_eq!(ctx.select_by_name("Nope", None).unwrap(), Err(Outcome::Failed));
        assert_eq!(
            ws.output.messages_at(MessageLevel::Error),
            vec!["Filter 'Nope' not found".to_string()]
        );
    }

    #[test]
    fn test_report_maps_outcomes() {
        let ws = TestWorkspace::new();
        let input = MockInput::new(vec![]);
        let ctx = ws.context(&input);
        assert_eq!(ctx.report(SaveOutcome::Saved, "A", "saved"), Outcome::Applied);
        assert_eq!(ctx.report(SaveOutcome::Cancelled, "A", "saved"), Outcome::Aborted);
        assert_eq!(ctx.report(SaveOutcome::Declined, "A", "saved"), Outcome::Aborted);
        assert_eq!(ctx.report(SaveOutcome::Failed, "A", "saved"), Outcome::Failed);
        assert_eq!(
            ws.output.messages_at(MessageLevel::Error),
            vec!["Failed to save filter 'A'".to_string()]
        );
    }
}
