/// One selectable item.
///
/// `name` is the string the typed buffer is matched against, `message` the
/// string shown in the list (defaults to `name`), and `value` what a
/// confirmed selection resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<V> {
    name: String,
    message: Option<String>,
    hint: Option<String>,
    value: V,
}

impl<V> Choice<V> {
    pub fn new(name: impl Into<String>, value: V) -> Self {
        Self {
            name: name.into(),
            message: None,
            hint: None,
            value,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// String used for filtering.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// String used for display.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.name)
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }
}

impl From<&str> for Choice<String> {
    fn from(name: &str) -> Self {
        Choice::new(name, name.to_string())
    }
}

impl From<String> for Choice<String> {
    fn from(name: String) -> Self {
        let value = name.clone();
        Choice::new(name, value)
    }
}
