use crate::infrastructure::terminal::CrosstermTerminal;

/// Creates a concrete TerminalPort implementation bound to the process's
/// stdin/stdout.
pub fn create_terminal_adapter() -> CrosstermTerminal {
    CrosstermTerminal::new()
}
