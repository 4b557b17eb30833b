#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub cols: u16,
    pub rows: u16,
}

impl TerminalSize {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

/// Hardware cursor position relative to the first line of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorPos {
    pub row: u16,
    pub col: u16,
}

/// One full repaint of the prompt: display lines plus where the hardware
/// cursor should rest. Lines may contain escape sequences; the terminal
/// adapter writes them verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
    pub cursor: Option<CursorPos>,
}

impl Frame {
    pub fn new(lines: Vec<String>, cursor: Option<CursorPos>) -> Self {
        Self { lines, cursor }
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }
}
