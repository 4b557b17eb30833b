pub mod choice_id;
pub mod frame;
pub mod key_action;

pub use choice_id::ChoiceId;
pub use frame::{CursorPos, Frame, TerminalSize};
pub use key_action::{CancelReason, KeyAction};
