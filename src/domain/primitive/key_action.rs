/// Why a prompt run was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The user pressed Esc.
    Escape,
    /// The user pressed Ctrl+C.
    Interrupt,
}

/// Semantic key actions decoded from raw terminal input.
///
/// Input that maps to none of these is dropped by the decoder and never
/// reaches the selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Insert(char),
    Backspace,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    First,
    Last,
    Submit,
    Cancel(CancelReason),
}

impl KeyAction {
    /// Whether this action ends the run when it is accepted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submit | Self::Cancel(_))
    }
}
