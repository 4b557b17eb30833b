use crate::domain::model::{PromptConfig, PromptOutcome, SelectionState, Transition};
use crate::domain::primitive::{CancelReason, ChoiceId, KeyAction};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Submitted(ChoiceId),
    Cancelled(CancelReason),
}

/// What the event loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Redraw,
    Idle,
    Finished(Resolution),
}

/// One run of a prompt: a borrowed configuration plus the selection state
/// that lives exactly as long as the run.
///
/// Once a resolution is reached the usecase is terminated and ignores any
/// further action.
pub struct PromptUsecase<'a, V> {
    config: &'a PromptConfig<V>,
    selection: SelectionState,
    resolution: Option<Resolution>,
}

impl<'a, V> PromptUsecase<'a, V> {
    pub fn new(config: &'a PromptConfig<V>) -> Self {
        let selection = SelectionState::new(
            config.match_keys(),
            config.matcher().clone(),
            config.limit(),
            config.initial(),
        );
        Self {
            config,
            selection,
            resolution: None,
        }
    }

    pub fn apply(&mut self, action: KeyAction) -> Step {
        if self.resolution.is_some() {
            return Step::Idle;
        }

        let transition = self.selection.apply(action);
        tracing::trace!(?action, ?transition, "key action applied");

        match transition {
            Transition::Changed => Step::Redraw,
            Transition::Unchanged => Step::Idle,
            Transition::Submitted(id) => self.finish(Resolution::Submitted(id)),
            Transition::Cancelled(reason) => self.finish(Resolution::Cancelled(reason)),
        }
    }

    pub fn config(&self) -> &'a PromptConfig<V> {
        self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    pub fn is_terminated(&self) -> bool {
        self.resolution.is_some()
    }

    /// Resolve to the caller-facing outcome, cloning the chosen value.
    pub fn outcome(&self) -> Option<PromptOutcome<V>>
    where
        V: Clone,
    {
        match self.resolution? {
            Resolution::Submitted(id) => self
                .config
                .choice(id)
                .map(|choice| PromptOutcome::Answer(choice.value().clone())),
            Resolution::Cancelled(reason) => Some(PromptOutcome::Cancelled(reason)),
        }
    }

    fn finish(&mut self, resolution: Resolution) -> Step {
        self.resolution = Some(resolution);
        Step::Finished(resolution)
    }
}
