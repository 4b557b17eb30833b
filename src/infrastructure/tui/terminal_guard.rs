use std::ops::{Deref, DerefMut};

use crate::interface_adapter::port::TerminalPort;
use crate::shared::error::PromptError;

/// Scoped raw-mode ownership.
///
/// Acquires the terminal on construction and gives it back exactly once:
/// either through [`TerminalGuard::release`], which reports failures, or on
/// drop (early return, `?`, panic unwind, or a dropped run future), which
/// can only log them.
pub struct TerminalGuard<'t, T: TerminalPort> {
    terminal: &'t mut T,
    released: bool,
}

impl<'t, T: TerminalPort> TerminalGuard<'t, T> {
    pub fn acquire(terminal: &'t mut T) -> Result<Self, PromptError> {
        terminal.acquire()?;
        tracing::debug!("terminal acquired");
        Ok(Self {
            terminal,
            released: false,
        })
    }

    pub fn release(mut self) -> Result<(), PromptError> {
        self.released = true;
        tracing::debug!("terminal released");
        self.terminal.release()
    }
}

impl<T: TerminalPort> Deref for TerminalGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.terminal
    }
}

impl<T: TerminalPort> DerefMut for TerminalGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: TerminalPort> Drop for TerminalGuard<'_, T> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match self.terminal.release() {
            Ok(()) => tracing::debug!("terminal released on unwind"),
            Err(err) => tracing::warn!(%err, "failed to release terminal"),
        }
    }
}
