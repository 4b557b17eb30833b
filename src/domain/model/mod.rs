pub mod choice;
pub mod highlight;
pub mod outcome;
pub mod prompt_config;
pub mod selection;

pub use choice::Choice;
pub use highlight::Highlight;
pub use outcome::PromptOutcome;
pub use prompt_config::{DEFAULT_ESCAPE_TIMEOUT, DEFAULT_LIMIT, PromptConfig, PromptConfigBuilder};
pub use selection::{SelectionState, Transition};
