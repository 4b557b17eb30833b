use super::{MatchResult, Matcher, fold_case, original_positions};

/// Case-insensitive substring matching.
///
/// Every match scores 0, so filtering keeps the original choice order.
/// Positions cover the first occurrence of the query.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl Matcher for SubstringMatcher {
    fn match_text(&self, query: &str, text: &str) -> Option<MatchResult> {
        if query.is_empty() {
            return Some(MatchResult {
                score: 0,
                positions: Vec::new(),
            });
        }

        let needle: Vec<char> = query.to_lowercase().chars().collect();
        let haystack = fold_case(text);
        if needle.len() > haystack.len() {
            return None;
        }

        let start = (0..=haystack.len() - needle.len()).find(|&start| {
            haystack[start..start + needle.len()]
                .iter()
                .zip(&needle)
                .all(|((h, _), n)| h == n)
        })?;

        let positions = original_positions(
            haystack[start..start + needle.len()]
                .iter()
                .map(|(_, orig)| *orig),
        );

        Some(MatchResult {
            score: 0,
            positions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_contiguous_substring() {
        let m = SubstringMatcher.match_text("pp", "apple").unwrap();
        assert_eq!(m.positions, vec![1, 2]);
    }

    #[test]
    fn match_is_case_insensitive() {
        let m = SubstringMatcher.match_text("APP", "Apple").unwrap();
        assert_eq!(m.positions, vec![0, 1, 2]);
    }

    #[test]
    fn first_occurrence_wins() {
        let m = SubstringMatcher.match_text("an", "banana").unwrap();
        assert_eq!(m.positions, vec![1, 2]);
    }

    #[test]
    fn subsequence_is_not_a_substring_match() {
        assert!(SubstringMatcher.match_text("ae", "apple").is_none());
    }

    #[test]
    fn query_longer_than_text_does_not_match() {
        assert!(SubstringMatcher.match_text("apples", "apple").is_none());
    }

    #[test]
    fn empty_query_matches_with_no_positions() {
        let m = SubstringMatcher.match_text("", "apple").unwrap();
        assert!(m.positions.is_empty());
    }

    #[test]
    fn empty_text_does_not_match_non_empty_query() {
        assert!(SubstringMatcher.match_text("a", "").is_none());
    }

    #[test]
    fn positions_are_char_indices() {
        // multi-byte chars before the match must not shift positions
        let m = SubstringMatcher.match_text("b", "\u{3042}\u{3044}b").unwrap();
        assert_eq!(m.positions, vec![2]);
    }

    #[test]
    fn space_inside_query_matches() {
        let m = SubstringMatcher.match_text("n c", "cotton candy").unwrap();
        assert_eq!(m.positions, vec![5, 6, 7]);
    }

    #[test]
    fn all_matches_score_zero() {
        let a = SubstringMatcher.match_text("a", "apple").unwrap();
        let b = SubstringMatcher.match_text("a", "banana").unwrap();
        assert_eq!(a.score, b.score);
    }
}
