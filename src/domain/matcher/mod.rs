//! Matching of the typed buffer against choice strings.
//!
//! A [`Matcher`] scores a single string; [`filter`] applies it to a whole
//! choice list and fixes the ordering: score descending, then original
//! index ascending.

pub mod fuzzy;
pub mod substring;

pub use fuzzy::FuzzyMatcher;
pub use substring::SubstringMatcher;

use crate::domain::primitive::ChoiceId;

/// Result of a successful match of a query against one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Higher = better match. Used for sorting results.
    pub score: i32,
    /// Character indices (not byte indices) in the matched string where the
    /// query matched, ascending.
    pub positions: Vec<usize>,
}

/// Match policy. Implementations must be pure and deterministic.
pub trait Matcher: Send + Sync {
    /// Match `query` against `text`, case-insensitively.
    ///
    /// Returns `None` when `text` does not match.
    fn match_text(&self, query: &str, text: &str) -> Option<MatchResult>;
}

/// A choice that survived filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredChoice {
    pub id: ChoiceId,
    pub score: i32,
}

/// Filter `keys` by `query` and return the survivors in display order.
///
/// An empty query keeps every key in original order.
pub fn filter<S: AsRef<str>>(
    matcher: &dyn Matcher,
    query: &str,
    keys: &[S],
) -> Vec<FilteredChoice> {
    if query.is_empty() {
        return (0..keys.len())
            .map(|idx| FilteredChoice {
                id: ChoiceId::new(idx),
                score: 0,
            })
            .collect();
    }

    let mut results: Vec<FilteredChoice> = keys
        .iter()
        .enumerate()
        .filter_map(|(idx, key)| {
            matcher
                .match_text(query, key.as_ref())
                .map(|m| FilteredChoice {
                    id: ChoiceId::new(idx),
                    score: m.score,
                })
        })
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));

    results
}

/// Lowercase `text` char by char, remembering which original character each
/// folded character came from. Some characters lowercase to more than one
/// char, so folded and original indices can diverge.
pub(crate) fn fold_case(text: &str) -> Vec<(char, usize)> {
    let mut folded = Vec::with_capacity(text.len());
    for (idx, ch) in text.chars().enumerate() {
        for lower in ch.to_lowercase() {
            folded.push((lower, idx));
        }
    }
    folded
}

/// Collapse folded positions into sorted, de-duplicated original indices.
pub(crate) fn original_positions(folded_positions: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut positions: Vec<usize> = folded_positions.collect();
    positions.dedup();
    positions
}
