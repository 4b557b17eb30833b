use crate::domain::primitive::ChoiceId;

#[derive(thiserror::Error, Debug)]
pub enum PromptError {
    #[error("Prompt '{name}' has no choices")]
    EmptyChoices { name: String },

    #[error("Prompt '{name}' has a window limit of 0")]
    InvalidLimit { name: String },

    #[error("Initial choice {initial} is out of range for {len} choices")]
    InitialOutOfRange { initial: ChoiceId, len: usize },

    #[error("Prompt '{name}' is already running")]
    AlreadyRunning { name: String },

    #[error("Terminal is owned by another prompt")]
    TerminalBusy,

    #[error("Terminal error: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("Input stream closed before an answer was given")]
    InputClosed,

    #[error("Render failed: {0}")]
    Render(String),
}

impl PromptError {
    /// Configuration and usage errors are reported before any terminal
    /// resource is touched.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyChoices { .. }
                | Self::InvalidLimit { .. }
                | Self::InitialOutOfRange { .. }
                | Self::AlreadyRunning { .. }
        )
    }
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        Self::Terminal(err)
    }
}
