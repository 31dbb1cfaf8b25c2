//! Scripted user input for testing

use super::input::{Result, UserInput};
use std::cell::RefCell;
use std::collections::VecDeque;

/// One scripted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Reply to `prompt_text` with exactly this text (empty clears the field)
    Text(String),
    /// Reply to `prompt_text` by accepting the prefilled text
    Keep,
    /// Reply to `prompt_confirm`
    Confirm(bool),
    /// Reply to `prompt_select`
    Select(usize),
    /// Reply to `prompt_multi_select`
    MultiSelect(Vec<usize>),
    /// Cancel whatever prompt comes next
    Cancel,
}

/// Mock input that replays predetermined answers in order
///
/// Running out of answers, or meeting an answer of the wrong kind, counts as
/// a cancellation. Every prompt text is recorded for assertions.
#[derive(Debug, Default)]
pub struct MockInput {
    answers: RefCell<VecDeque<Answer>>,
    prompts: RefCell<Vec<String>>,
}

impl MockInput {
    /// Create a mock input with scripted answers
    #[must_use]
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Create a mock input that cancels the first prompt
    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(vec![Answer::Cancel])
    }

    /// Prompts shown so far
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    /// Answers not consumed yet
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, prompt: &str) -> Option<Answer> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers.borrow_mut().pop_front()
    }
}

impl UserInput for MockInput {
    fn prompt_text(
        &self,
        prompt: &str,
        initial: Option<&str>,
        allow_empty: bool,
    ) -> Result<Option<String>> {
        let text = match self.next(prompt) {
            Some(Answer::Text(text)) => text,
            Some(Answer::Keep) => initial.unwrap_or_default().to_string(),
            _ => return Ok(None),
        };
        if !allow_empty && text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(text))
    }

    fn prompt_confirm(&self, prompt: &str, _default: bool) -> Result<Option<bool>> {
        match self.next(prompt) {
            Some(Answer::Confirm(value)) => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        _default: Option<usize>,
    ) -> Result<Option<usize>> {
        match self.next(prompt) {
            Some(Answer::Select(index)) if index < items.len() => Ok(Some(index)),
            _ => Ok(None),
        }
    }

    fn prompt_multi_select(&self, prompt: &str, items: &[String]) -> Result<Option<Vec<usize>>> {
        match self.next(prompt) {
            Some(Answer::MultiSelect(indices)) => {
                Ok(Some(indices.into_iter().filter(|i| *i < items.len()).collect()))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_input_replays_answers() {
        let input = MockInput::new(vec![
            Answer::Text("frontend".to_string()),
            Answer::Confirm(true),
            Answer::Select(1),
            Answer::MultiSelect(vec![0, 2]),
        ]);
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        assert_eq!(input.prompt_text("Name", None, false).unwrap(), Some("frontend".to_string()));
        assert_eq!(input.prompt_confirm("Sure?", false).unwrap(), Some(true));
        assert_eq!(input.prompt_select("Pick", &items, None).unwrap(), Some(1));
        assert_eq!(input.prompt_multi_select("Pick", &items).unwrap(), Some(vec![0, 2]));
        assert_eq!(input.prompts(), vec!["Name", "Sure?", "Pick", "Pick"]);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_mock_input_cancel_and_exhaustion() {
        let input = MockInput::cancelled();
        assert_eq!(input.prompt_text("Name", None, true).unwrap(), None);
        assert_eq!(input.prompt_confirm("Sure?", true).unwrap(), None);
    }

    #[test]
    fn test_mock_input_keep_and_clear() {
        let input = MockInput::new(vec![
            Answer::Keep,
            Answer::Text(String::new()),
            Answer::Text("  ".to_string()),
        ]);
        assert_eq!(input.prompt_text("Include", Some("src/**"), true).unwrap(), Some("src/**".to_string()));
        assert_eq!(input.prompt_text("Exclude", Some("dist/**"), true).unwrap(), Some(String::new()));
        assert_eq!(input.prompt_text("Name", None, false).unwrap(), None);
    }
}
