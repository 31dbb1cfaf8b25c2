//! Merge several filters into a new one

use super::{Context, Outcome};
use crate::filters::{FilterScope, SearchFilter};
use crate::patterns::{append_patterns, split_patterns};
use crate::Result;

/// Create a filter whose patterns are the union of two or more filters
///
/// Without names the user multi-selects from all saved filters. Patterns are
/// merged in selection order, each one kept once.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn combine(
    ctx: &Context<'_>,
    names: &[String],
    name: Option<&str>,
    scope: Option<FilterScope>,
) -> Result<Outcome> {
    let sources = if names.is_empty() {
        let filters = ctx.registry.load_all();
        if filters.len() < 2 {
            ctx.output.error("At least two saved filters are needed to combine");
            return Ok(Outcome::Failed);
        }
        let labels: Vec<String> = filters.iter().map(SearchFilter::label).collect();
        let picked = ask!(ctx.input.prompt_multi_select("Filters to combine", &labels));
        filters
            .into_iter()
            .enumerate()
            .filter(|(i, _)| picked.contains(i))
            .map(|(_, f)| f)
            .collect()
    } else {
        let mut sources = Vec::with_capacity(names.len());
        for name in names {
            sources.push(selected!(ctx.select_by_name(name, None)));
        }
        sources
    };

    if sources.len() < 2 {
        ctx.output.error("Select at least two filters to combine");
        return Ok(Outcome::Failed);
    }

    let (include, exclude) = merge(&sources);
    let default_name = sources
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(" + ");

    let name = ask!(ctx.name_or_prompt(name, Some(&default_name)));
    let Some(name) = ctx.checked_name(&name) else {
        return Ok(Outcome::Failed);
    };
    ctx.save(SearchFilter::new(name, include, exclude), scope)
}

/// Union of the include and exclude patterns of `filters`, in order
fn merge(filters: &[SearchFilter]) -> (String, String) {
    filters
        .iter()
        .fold((String::new(), String::new()), |(include, exclude), f| {
            (
                append_patterns(&include, &split_patterns(&f.include)).patterns,
                append_patterns(&exclude, &split_patterns(&f.exclude)).patterns,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestWorkspace;
    use crate::ui::mock::{Answer, MockInput};

    #[test]
    fn test_merge_dedupes_in_order() {
        let filters = vec![
            SearchFilter::new("A", "src/**, lib/**", "**/*.log"),
            SearchFilter::new("B", "lib/**,docs/**", ""),
            SearchFilter::new("C", "", "**/*.log,dist/**"),
        ];
        assert_eq!(
            merge(&filters),
            ("src/**,lib/**,docs/**".to_string(), "**/*.log,dist/**".to_string())
        );
    }

    #[test]
    fn test_combine_by_multi_select() {
        let ws = TestWorkspace::new();
        ws.seed(SearchFilter::new("A", "src/**", ""), FilterScope::Global);
        ws.seed(SearchFilter::new("B", "test/**", "**/*.snap"), FilterScope::Global);
        ws.seed(SearchFilter::new("C", "docs/**", ""), FilterScope::Workspace);
        let input = MockInput::new(vec![
            Answer::MultiSelect(vec![0, 2]),
            Answer::Keep,
            Answer::Select(0),
        ]);

        let outcome = combine(&ws.context(&input), &[], None, None).unwrap();
        assert_eq!(outcome, Outcome::Applied);

        let combined = &ws.registry.find_by_name("A + C")[0];
        assert_eq!(combined.include, "src/**,docs/**");
        assert_eq!(combined.exclude, "");
        assert_eq!(combined.scope, FilterScope::Global);
    }

    #[test]
    fn test_combine_needs_two_selections() {
        let ws = TestWorkspace::new();
        ws.seed(SearchFilter::new("A", "src/**", ""), FilterScope::Global);
        ws.seed(SearchFilter::new("B", "test/**", ""), FilterScope::Global);
        let input = MockInput::new(vec![Answer::MultiSelect(vec![1])]);

        let outcome = combine(&ws.context(&input), &[], None, None).unwrap();
        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(ws.registry.load_all().len(), 2);
    }

    #[test]
    fn test_combine_by_name() {
        let ws = TestWorkspace::new();
        ws.seed(SearchFilter::new("A", "src/**", ""), FilterScope::Global);
        ws.seed(SearchFilter::new("B", "src/**,test/**", ""), FilterScope::Workspace);
        let input = MockInput::new(vec![]);
        let names = vec!["A".to_string(), "B".to_string()];

        let outcome = combine(
            &ws.context(&input),
            &names,
            Some("Both"),
            Some(FilterScope::Workspace),
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(
            ws.registry.load_scope(FilterScope::Workspace)[1].include,
            "src/**,test/**"
        );
    }
}
