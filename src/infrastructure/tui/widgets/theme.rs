use crossterm::style::Stylize;

/// Glyphs and colors used by the prompt widgets.
///
/// `plain()` emits no escape sequences at all, which keeps rendered frames
/// easy to assert on and is what `--no-color` selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    colored: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

impl Theme {
    pub const PREFIX: &'static str = "?";
    pub const POINTER: &'static str = "\u{276F}";
    pub const SEPARATOR: &'static str = "\u{203A}";
    pub const SUCCESS: &'static str = "\u{2714}";
    pub const FAILURE: &'static str = "\u{2716}";
    pub const ANSWER_SEPARATOR: &'static str = "\u{00B7}";

    pub fn colored() -> Self {
        Self { colored: true }
    }

    pub fn plain() -> Self {
        Self { colored: false }
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }

    pub fn prefix(&self) -> String {
        self.paint(Self::PREFIX, |s| s.cyan().bold().to_string())
    }

    pub fn separator(&self) -> String {
        self.paint(Self::SEPARATOR, |s| s.dark_grey().to_string())
    }

    /// Marker column of a candidate line; blank for non-cursored rows.
    pub fn pointer(&self, active: bool) -> String {
        if active {
            self.paint(Self::POINTER, |s| s.cyan().to_string())
        } else {
            " ".to_string()
        }
    }

    pub fn success(&self) -> String {
        self.paint(Self::SUCCESS, |s| s.green().to_string())
    }

    pub fn failure(&self) -> String {
        self.paint(Self::FAILURE, |s| s.red().to_string())
    }

    pub fn message(&self, text: &str) -> String {
        self.paint(text, |s| s.bold().to_string())
    }

    pub fn answer(&self, text: &str) -> String {
        self.paint(text, |s| s.cyan().to_string())
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(text, |s| s.dim().to_string())
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> String) -> String {
        if self.colored {
            style(text)
        } else {
            text.to_string()
        }
    }
}
