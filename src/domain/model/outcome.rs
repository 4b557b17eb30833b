use crate::domain::primitive::CancelReason;

/// Terminal outcome of one prompt run.
///
/// Cancellation is an expected answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome<V> {
    Answer(V),
    Cancelled(CancelReason),
}

impl<V> PromptOutcome<V> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    pub fn answer(self) -> Option<V> {
        match self {
            Self::Answer(value) => Some(value),
            Self::Cancelled(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_yields_value() {
        let outcome = PromptOutcome::Answer("apple");
        assert!(!outcome.is_cancelled());
        assert_eq!(outcome.answer(), Some("apple"));
    }

    #[test]
    fn cancelled_yields_none() {
        let outcome: PromptOutcome<&str> = PromptOutcome::Cancelled(CancelReason::Escape);
        assert!(outcome.is_cancelled());
        assert_eq!(outcome.answer(), None);
    }
}
