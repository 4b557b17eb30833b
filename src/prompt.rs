use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::model::{PromptConfig, PromptOutcome};
use crate::infrastructure::tui::app_runner;
use crate::infrastructure::tui::widgets::Theme;
use crate::interface_adapter::adapter::terminal_adapter_factory;
use crate::interface_adapter::port::TerminalPort;
use crate::shared::error::PromptError;

/// An autocomplete prompt: a configuration plus the guarantee that it runs
/// at most once at a time.
///
/// ```no_run
/// use autocomplete_prompt::{AutocompletePrompt, PromptConfig, PromptOutcome};
///
/// # async fn demo() -> Result<(), autocomplete_prompt::PromptError> {
/// let config = PromptConfig::<String>::builder("flavor", "Pick your favorite flavor")
///     .choices(["apple", "banana", "grape"])
///     .limit(5)
///     .build();
///
/// match AutocompletePrompt::new(config).run_on_stdio().await? {
///     PromptOutcome::Answer(flavor) => println!("{flavor}"),
///     PromptOutcome::Cancelled(_) => println!("cancelled"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AutocompletePrompt<V> {
    config: PromptConfig<V>,
    theme: Theme,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when a run ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<V: Clone> AutocompletePrompt<V> {
    pub fn new(config: PromptConfig<V>) -> Self {
        Self {
            config,
            theme: Theme::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn config(&self) -> &PromptConfig<V> {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run the prompt on `terminal`.
    ///
    /// Resolves with the chosen value or a cancellation; errors are reserved
    /// for configuration problems, a second concurrent `run`, terminal
    /// failures and panics inside the highlight transform or matcher.
    pub async fn run<T: TerminalPort>(
        &self,
        terminal: &mut T,
    ) -> Result<PromptOutcome<V>, PromptError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PromptError::AlreadyRunning {
                name: self.config.name().to_string(),
            });
        }
        let _in_flight = InFlight(&self.in_flight);

        app_runner::run(&self.config, terminal, &self.theme).await
    }

    /// Run the prompt on the process's own terminal.
    pub async fn run_on_stdio(&self) -> Result<PromptOutcome<V>, PromptError> {
        let mut terminal = terminal_adapter_factory::create_terminal_adapter();
        self.run(&mut terminal).await
    }
}
