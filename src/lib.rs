//! Interactive autocomplete prompt for the terminal.
//!
//! The user types to filter a list of choices, moves through the visible
//! window with the arrow keys and confirms with Enter. [`AutocompletePrompt::run`]
//! resolves with the chosen value or a [`PromptOutcome::Cancelled`].

pub mod domain;
pub mod infrastructure;
pub mod interface_adapter;
pub mod prompt;
pub mod shared;
pub mod usecase;

pub use domain::matcher::{FuzzyMatcher, MatchResult, Matcher, SubstringMatcher};
pub use domain::model::{Choice, Highlight, PromptConfig, PromptConfigBuilder, PromptOutcome};
pub use domain::primitive::{CancelReason, ChoiceId, KeyAction};
pub use infrastructure::terminal::CrosstermTerminal;
pub use infrastructure::tui::widgets::Theme;
pub use interface_adapter::port::TerminalPort;
pub use prompt::AutocompletePrompt;
pub use shared::error::PromptError;
