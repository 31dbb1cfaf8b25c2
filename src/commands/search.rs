//! Run a search with a saved filter

use super::{Context, Outcome};
use crate::filters::FilterScope;
use crate::launch::SearchLauncher;
use crate::Result;

/// Apply a filter: hand its include and exclude strings to the launcher
///
/// Without a name the user picks among the visible filters (disabled
/// global filters are not offered). The strings are passed verbatim.
///
/// # Errors
///
/// Returns an error if a prompt fails or the search cannot be started.
pub fn search(
    ctx: &Context<'_>,
    name: Option<&str>,
    scope: Option<FilterScope>,
    launcher: &dyn SearchLauncher,
) -> Result<Outcome> {
    let filter = if let Some(name) = name {
        selected!(ctx.select_by_name(name, scope))
    } else {
        let mut filters = ctx.registry.load_visible();
        if let Some(scope) = scope {
            filters.retain(|f| f.scope == scope);
        }
        if filters.is_empty() {
            ctx.output.info("No filters available. Create one with: search-filters add");
            return Ok(Outcome::NoChanges);
        }
        ask!(ctx.pick("Search with filter", filters))
    };

    tracing::debug!(filter = %filter.key(), "Applying filter");
    launcher.launch(&filter.include, &filter.exclude)?;
    Ok(Outcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::SearchFilter;
    use crate::launch::LaunchError;
    use crate::testing::TestWorkspace;
    use crate::ui::mock::{Answer, MockInput};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingLauncher {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl SearchLauncher for RecordingLauncher {
        fn launch(&self, include: &str, exclude: &str) -> std::result::Result<(), LaunchError> {
            self.calls
                .borrow_mut()
                .push((include.to_string(), exclude.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_search_passes_patterns_verbatim() {
        let ws = TestWorkspace::new();
        ws.seed(SearchFilter::new("A", " src/** ,lib/**", "**/*.snap"), FilterScope::Workspace);
        let launcher = RecordingLauncher::default();
        let input = MockInput::new(vec![]);

        let outcome = search(&ws.context(&input), Some("A"), None, &launcher).unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(
            launcher.calls.borrow().as_slice(),
            &[(" src/** ,lib/**".to_string(), "**/*.snap".to_string())]
        );
    }

    #[test]
    fn test_search_picker_hides_disabled_filters() {
        let ws = TestWorkspace::new();
        ws.seed(SearchFilter::new("Hidden", "h/**", ""), FilterScope::Global);
        ws.seed(SearchFilter::new("Shown", "s/**", ""), FilterScope::Global);
        assert!(ws.registry.set_enabled("Hidden", false));
        let launcher = RecordingLauncher::default();
        let input = MockInput::new(vec![Answer::Select(0)]);

        let outcome = search(&ws.context(&input), None, None, &launcher).unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(launcher.calls.borrow()[0].0, "s/**");
    }

    #[test]
    fn test_search_cancelled_pick_launches_nothing() {
        let ws = TestWorkspace::new();
        ws.seed(SearchFilter::new("A", "a/**", ""), FilterScope::Global);
        let launcher = RecordingLauncher::default();
        let input = MockInput::cancelled();

        let outcome = search(&ws.context(&input), None, None, &launcher).unwrap();
        assert_eq!(outcome, Outcome::Aborted);
        assert!(launcher.calls.borrow().is_empty());
    }
}
