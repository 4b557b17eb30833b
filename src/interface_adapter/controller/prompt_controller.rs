use crate::domain::primitive::KeyAction;
use crate::usecase::prompt_usecase::{PromptUsecase, Step};

/// Thin controller that forwards decoded `KeyAction`s to the usecase.
///
/// Lives in `interface_adapter` so it has no dependency on infrastructure
/// (crossterm, tokio, etc.). The app runner owns a `PromptController` and
/// calls `dispatch` for every decoded action, in arrival order.
pub struct PromptController<'a, V> {
    usecase: PromptUsecase<'a, V>,
}

impl<'a, V> PromptController<'a, V> {
    pub fn new(usecase: PromptUsecase<'a, V>) -> Self {
        Self { usecase }
    }

    /// Dispatch a batch of actions, stopping at the first one that ends the
    /// run. Returns the combined step: `Finished` wins over `Redraw`, which
    /// wins over `Idle`.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = KeyAction>) -> Step {
        let mut step = Step::Idle;
        for action in actions {
            match self.dispatch(action) {
                Step::Finished(resolution) => return Step::Finished(resolution),
                Step::Redraw => step = Step::Redraw,
                Step::Idle => {}
            }
        }
        step
    }

    pub fn dispatch(&mut self, action: KeyAction) -> Step {
        self.usecase.apply(action)
    }

    /// Read accessor for rendering.
    pub fn usecase(&self) -> &PromptUsecase<'a, V> {
        &self.usecase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PromptConfig;
    use crate::domain::primitive::{CancelReason, ChoiceId};
    use crate::usecase::prompt_usecase::Resolution;

    fn config() -> PromptConfig<String> {
        PromptConfig::<String>::builder("flavor", "Pick")
            .choices(["apple", "banana", "grape"])
            .build()
    }

    // =========================================================================
    // Tests: dispatch
    // =========================================================================

    #[test]
    fn dispatch_forwards_to_usecase() {
        let config = config();
        let mut ctrl = PromptController::new(PromptUsecase::new(&config));
        assert_eq!(ctrl.dispatch(KeyAction::Insert('g')), Step::Redraw);
        assert_eq!(ctrl.usecase().selection().input(), "g");
    }

    // =========================================================================
    // Tests: dispatch_all
    // =========================================================================

    #[test]
    fn dispatch_all_empty_batch_is_idle() {
        let config = config();
        let mut ctrl = PromptController::new(PromptUsecase::new(&config));
        assert_eq!(ctrl.dispatch_all(Vec::new()), Step::Idle);
    }

    #[test]
    fn dispatch_all_reports_redraw_if_any_action_changed_state() {
        let config = config();
        let mut ctrl = PromptController::new(PromptUsecase::new(&config));
        let step = ctrl.dispatch_all([KeyAction::Backspace, KeyAction::MoveDown]);
        assert_eq!(step, Step::Redraw);
    }

    #[test]
    fn dispatch_all_applies_actions_in_order() {
        let config = config();
        let mut ctrl = PromptController::new(PromptUsecase::new(&config));
        let step = ctrl.dispatch_all([
            KeyAction::Insert('a'),
            KeyAction::Insert('p'),
            KeyAction::Submit,
        ]);
        assert_eq!(step, Step::Finished(Resolution::Submitted(ChoiceId::new(0))));
    }

    #[test]
    fn dispatch_all_stops_at_terminal_action() {
        let config = config();
        let mut ctrl = PromptController::new(PromptUsecase::new(&config));
        let step = ctrl.dispatch_all([
            KeyAction::Cancel(CancelReason::Escape),
            KeyAction::Insert('x'),
        ]);
        assert_eq!(step, Step::Finished(Resolution::Cancelled(CancelReason::Escape)));
        assert_eq!(ctrl.usecase().selection().input(), "");
    }
}
