use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::matcher::{Matcher, SubstringMatcher};
use crate::domain::model::{Choice, Highlight};
use crate::domain::primitive::ChoiceId;
use crate::shared::error::PromptError;

/// Number of choice lines shown at once when no limit is configured.
pub const DEFAULT_LIMIT: usize = 10;

/// How long a lone ESC waits for the rest of an escape sequence.
pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(50);

/// Immutable configuration of one prompt.
///
/// Built with [`PromptConfig::builder`]. Construction never fails; problems
/// such as an empty choice list surface from [`PromptConfig::validate`],
/// which every run calls before touching the terminal.
pub struct PromptConfig<V> {
    name: String,
    message: String,
    choices: Vec<Choice<V>>,
    highlight: Option<Arc<dyn Highlight>>,
    limit: usize,
    initial: usize,
    matcher: Arc<dyn Matcher>,
    escape_timeout: Duration,
}

impl<V> PromptConfig<V> {
    pub fn builder(name: impl Into<String>, message: impl Into<String>) -> PromptConfigBuilder<V> {
        PromptConfigBuilder {
            config: PromptConfig {
                name: name.into(),
                message: message.into(),
                choices: Vec::new(),
                highlight: None,
                limit: DEFAULT_LIMIT,
                initial: 0,
                matcher: Arc::new(SubstringMatcher),
                escape_timeout: DEFAULT_ESCAPE_TIMEOUT,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn choices(&self) -> &[Choice<V>] {
        &self.choices
    }

    pub fn choice(&self, id: ChoiceId) -> Option<&Choice<V>> {
        self.choices.get(id.index())
    }

    pub fn highlight(&self) -> Option<&dyn Highlight> {
        self.highlight.as_deref()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn initial(&self) -> usize {
        self.initial
    }

    pub fn matcher(&self) -> &Arc<dyn Matcher> {
        &self.matcher
    }

    pub fn escape_timeout(&self) -> Duration {
        self.escape_timeout
    }

    /// Strings the typed buffer is matched against, in choice order.
    pub fn match_keys(&self) -> Vec<String> {
        self.choices.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn validate(&self) -> Result<(), PromptError> {
        if self.choices.is_empty() {
            return Err(PromptError::EmptyChoices {
                name: self.name.clone(),
            });
        }
        if self.limit == 0 {
            return Err(PromptError::InvalidLimit {
                name: self.name.clone(),
            });
        }
        if self.initial >= self.choices.len() {
            return Err(PromptError::InitialOutOfRange {
                initial: ChoiceId::new(self.initial),
                len: self.choices.len(),
            });
        }
        Ok(())
    }
}

impl<V: fmt::Debug> fmt::Debug for PromptConfig<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptConfig")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("choices", &self.choices)
            .field("highlight", &self.highlight.is_some())
            .field("limit", &self.limit)
            .field("initial", &self.initial)
            .field("escape_timeout", &self.escape_timeout)
            .finish_non_exhaustive()
    }
}

pub struct PromptConfigBuilder<V> {
    config: PromptConfig<V>,
}

impl<V> PromptConfigBuilder<V> {
    pub fn choices<I, C>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice<V>>,
    {
        self.config.choices.extend(choices.into_iter().map(Into::into));
        self
    }

    pub fn choice(mut self, choice: impl Into<Choice<V>>) -> Self {
        self.config.choices.push(choice.into());
        self
    }

    pub fn highlight<H: Highlight + 'static>(mut self, highlight: H) -> Self {
        self.config.highlight = Some(Arc::new(highlight));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    pub fn initial(mut self, initial: usize) -> Self {
        self.config.initial = initial;
        self
    }

    pub fn matcher<M: Matcher + 'static>(mut self, matcher: M) -> Self {
        self.config.matcher = Arc::new(matcher);
        self
    }

    pub fn escape_timeout(mut self, timeout: Duration) -> Self {
        self.config.escape_timeout = timeout;
        self
    }

    pub fn build(self) -> PromptConfig<V> {
        self.config
    }
}
