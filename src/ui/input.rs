//! User input abstraction layer
//!
//! Commands prompt through the `UserInput` trait so that the prompt chains
//! can run against `dialoguer` in a terminal or against scripted answers in
//! tests. Every prompt returns `Ok(None)` when the user cancels.

use std::io;

/// Trait for user input operations
///
/// # Examples
///
/// ```no_run
/// use search_filters::ui::input::{UserInput, DialoguerInput};
///
/// let input = DialoguerInput::new();
///
/// if let Some(name) = input.prompt_text("Filter name", None, false).unwrap() {
///     println!("Creating {name}");
/// }
/// ```
pub trait UserInput {
    /// Prompt user for a single line of text
    ///
    /// `initial` is prefilled as editable text: the user can keep it, change
    /// it, or clear it. When `allow_empty` is false, input that is empty
    /// after trimming is rejected and the user is asked again.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(String))` - User entered text (possibly empty)
    /// * `Ok(None)` - User cancelled; terminal implementations without a
    ///   cancel key never return this
    /// * `Err(_)` - Input operation failed
    fn prompt_text(
        &self,
        prompt: &str,
        initial: Option<&str>,
        allow_empty: bool,
    ) -> Result<Option<String>>;

    /// Prompt user for confirmation (yes/no)
    ///
    /// # Returns
    ///
    /// * `Ok(Some(bool))` - User confirmed (true) or denied (false)
    /// * `Ok(None)` - User cancelled
    /// * `Err(_)` - Input operation failed
    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>>;

    /// Prompt user to pick one item
    ///
    /// # Returns
    ///
    /// * `Ok(Some(usize))` - Index of selected item
    /// * `Ok(None)` - User cancelled
    /// * `Err(_)` - Input operation failed
    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>>;

    /// Prompt user to pick any number of items
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Vec<usize>))` - Indices of selected items, in list order
    /// * `Ok(None)` - User cancelled
    /// * `Err(_)` - Input operation failed
    fn prompt_multi_select(&self, prompt: &str, items: &[String]) -> Result<Option<Vec<usize>>>;
}

/// Result type for user input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors that can occur during user input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// IO error during input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<dialoguer::Error> for InputError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(e) => Self::Io(e),
        }
    }
}

/// Terminal prompts using dialoguer
pub struct DialoguerInput {
    theme: dialoguer::theme::ColorfulTheme,
}

impl DialoguerInput {
    /// Create a new dialoguer-based input handler
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInput for DialoguerInput {
    /// Read a line with dialoguer's `Input`
    ///
    /// dialoguer has no cancellable text prompt, so this never returns
    /// `Ok(None)`; Ctrl-C ends the process before anything is written.
    fn prompt_text(
        &self,
        prompt: &str,
        initial: Option<&str>,
        allow_empty: bool,
    ) -> Result<Option<String>> {
        use dialoguer::Input;

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(allow_empty);

        // Prefill instead of `default`, which would replace an emptied line.
        if let Some(text) = initial {
            input = input.with_initial_text(text);
        }

        if !allow_empty {
            input = input.validate_with(|value: &String| -> std::result::Result<(), &str> {
                if value.trim().is_empty() {
                    Err("A value is required")
                } else {
                    Ok(())
                }
            });
        }

        Ok(Some(input.interact_text()?))
    }

    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>> {
        use dialoguer::Confirm;

        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?)
    }

    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        use dialoguer::Select;

        let mut select = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items);

        if let Some(def) = default {
            select = select.default(def);
        }

        Ok(select.interact_opt()?)
    }

    fn prompt_multi_select(&self, prompt: &str, items: &[String]) -> Result<Option<Vec<usize>>> {
        use dialoguer::MultiSelect;

        Ok(MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .interact_opt()?)
    }
}
