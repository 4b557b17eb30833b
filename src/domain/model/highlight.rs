/// Caller-supplied transform applied to the matched part of a choice.
///
/// No contract beyond string in, string out; the renderer never inspects the
/// result.
pub trait Highlight: Send + Sync {
    fn highlight(&self, text: &str) -> String;
}

impl<F> Highlight for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn highlight(&self, text: &str) -> String {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_highlights() {
        let brackets = |s: &str| format!("[{s}]");
        assert_eq!(brackets.highlight("ap"), "[ap]");
    }

    #[test]
    fn function_items_are_highlights() {
        fn upper(s: &str) -> String {
            s.to_uppercase()
        }
        let h: &dyn Highlight = &upper;
        assert_eq!(h.highlight("ap"), "AP");
    }
}
