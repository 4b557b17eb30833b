pub mod crossterm_terminal;

pub use crossterm_terminal::CrosstermTerminal;
