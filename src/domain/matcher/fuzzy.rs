use super::{MatchResult, Matcher, fold_case, original_positions};

/// Case-insensitive subsequence matching with a small scoring model.
///
/// Every character of the query must appear in the text in order. Scoring:
/// +5 for each match directly after the previous one, +10 for a match at the
/// start of the text, +5 for a match right after a separator (`/ - _ space`),
/// and -1 per character of distance from the start.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher;

fn is_separator(ch: char) -> bool {
    ch == '/' || ch == '-' || ch == '_' || ch == ' '
}

impl Matcher for FuzzyMatcher {
    fn match_text(&self, query: &str, text: &str) -> Option<MatchResult> {
        if query.is_empty() {
            return None;
        }

        let query_lower: Vec<char> = query.to_lowercase().chars().collect();
        let target = fold_case(text);
        let target_chars: Vec<char> = text.chars().collect();

        let mut folded_positions: Vec<usize> = Vec::with_capacity(query_lower.len());
        let mut target_idx = 0;

        for query_char in &query_lower {
            let found = target[target_idx..]
                .iter()
                .position(|(ch, _)| ch == query_char)?;
            folded_positions.push(target_idx + found);
            target_idx += found + 1;
        }

        let positions =
            original_positions(folded_positions.iter().map(|&folded| target[folded].1));

        let mut score: i32 = 0;
        for (i, &pos) in positions.iter().enumerate() {
            if i > 0 && pos == positions[i - 1] + 1 {
                score += 5;
            }
            if pos == 0 {
                score += 10;
            }
            if pos > 0 && is_separator(target_chars[pos - 1]) {
                score += 5;
            }
            score -= pos as i32;
        }

        Some(MatchResult { score, positions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fuzzy_match(query: &str, target: &str) -> Option<MatchResult> {
        FuzzyMatcher.match_text(query, target)
    }

    // Basic match: "abc" matches "a_b_c"
    #[test]
    fn basic_subsequence_match() {
        let m = fuzzy_match("abc", "a_b_c").unwrap();
        assert_eq!(m.positions, vec![0, 2, 4]);
    }

    #[test]
    fn no_match() {
        assert!(fuzzy_match("xyz", "abc").is_none());
    }

    #[test]
    fn case_insensitive_match() {
        assert!(fuzzy_match("ABC", "abc").is_some());
    }

    #[test]
    fn consecutive_scores_higher_than_non_consecutive() {
        let consecutive = fuzzy_match("abc", "abcdef").unwrap();
        let non_consecutive = fuzzy_match("abc", "a_b_c").unwrap();
        assert!(consecutive.score > non_consecutive.score);
    }

    // "ch" at the head of "cherry" beats "ch" inside "pinch"
    #[test]
    fn head_match_scores_higher() {
        let head = fuzzy_match("ch", "cherry").unwrap();
        let mid = fuzzy_match("ch", "pinch").unwrap();
        assert!(head.score > mid.score);
    }

    #[test]
    fn separator_bonus() {
        let with_sep = fuzzy_match("my", "/my-app").unwrap();
        let without_sep = fuzzy_match("my", "army").unwrap();
        assert!(with_sep.score > without_sep.score);
    }

    #[test]
    fn empty_query_no_match() {
        assert!(fuzzy_match("", "anything").is_none());
    }

    #[test]
    fn empty_target_no_match() {
        assert!(fuzzy_match("a", "").is_none());
    }

    #[test]
    fn japanese_chars_no_crash() {
        let m = fuzzy_match("\u{30c6}", "\u{30c6}\u{30b9}\u{30c8}");
        assert!(m.is_some());
    }

    #[test]
    fn positions_are_char_indices() {
        let m = fuzzy_match("ac", "abcd").unwrap();
        assert_eq!(m.positions, vec![0, 2]);
    }

    #[test]
    fn repeated_query_chars_need_repeated_target_chars() {
        assert!(fuzzy_match("pp", "pear").is_none());
        assert_eq!(fuzzy_match("pp", "apple").unwrap().positions, vec![1, 2]);
    }
}
