use std::future::Future;

use crate::domain::primitive::{Frame, TerminalSize};
use crate::shared::error::PromptError;

/// Terminal device operations port.
///
/// Defines the boundary between the prompt engine and the terminal device.
/// Concrete implementations (e.g., CrosstermTerminal) live in infrastructure;
/// escape-sequence encoding is entirely their concern.
pub trait TerminalPort: Send {
    /// Take exclusive raw-mode ownership of the device.
    fn acquire(&mut self) -> Result<(), PromptError>;

    /// Give raw-mode ownership back. Calling it without ownership is a no-op.
    fn release(&mut self) -> Result<(), PromptError>;

    /// Wait for the next chunk of raw input bytes. An empty chunk means the
    /// input stream is closed.
    fn read_input(&mut self) -> impl Future<Output = Result<Vec<u8>, PromptError>> + Send;

    /// Current device size.
    fn size(&self) -> TerminalSize;

    /// Replace the currently displayed frame with `frame`.
    fn draw(&mut self, frame: &Frame) -> Result<(), PromptError>;

    /// Draw `frame` one last time and leave the cursor below it.
    fn finish(&mut self, frame: &Frame) -> Result<(), PromptError>;
}
