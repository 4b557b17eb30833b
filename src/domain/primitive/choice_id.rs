use std::fmt;

/// Position of a choice in the configured choice list.
///
/// Identity is positional and stable across filtering, so a confirmed
/// selection always maps back to the original value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChoiceId(usize);

impl ChoiceId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_id_round_trips_index() {
        assert_eq!(ChoiceId::new(7).index(), 7);
    }

    #[test]
    fn choice_id_orders_by_index() {
        assert!(ChoiceId::new(1) < ChoiceId::new(2));
    }

    #[test]
    fn choice_id_displays_as_number() {
        assert_eq!(ChoiceId::new(3).to_string(), "3");
    }
}
