use crate::domain::primitive::{CancelReason, KeyAction};

const ESC: u8 = 0x1B;

/// Longest escape sequence kept while waiting for its final byte. Anything
/// longer is garbage and gets dropped.
const MAX_SEQUENCE_LEN: usize = 32;

/// Result of parsing the front of the pending byte buffer.
#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    /// A complete unit mapped to an action; consumes the given byte count.
    Action(KeyAction, usize),
    /// A complete unit with no meaning for the prompt; consumes the bytes.
    Ignored(usize),
    /// The buffer ends in the middle of a unit.
    Incomplete,
}

/// Converts raw terminal input bytes into `KeyAction`s.
///
/// Input arrives in arbitrary chunks: an escape sequence or a multi-byte
/// UTF-8 character may be split across reads. Bytes that do not yet form a
/// complete unit stay in `pending` until the next `feed`. A lone ESC is
/// ambiguous (Esc key, or the start of a sequence) and also stays pending;
/// the caller resolves it with `flush` once no more input arrives within
/// its escape timeout.
///
/// Decoded keys:
/// - printable characters (any UTF-8 scalar that is not a control char)
/// - `CR`/`LF` submit, `DEL`/`BS` backspace
/// - `ESC [ A`/`ESC O A` up, `ESC [ B`/`ESC O B` down, `Ctrl+P`/`Ctrl+N`
/// - `Home`/`End` (`ESC [ H`, `ESC [ F`, `ESC [ 1~`, `ESC [ 4~`, SS3 forms)
/// - `PageUp`/`PageDown` (`ESC [ 5~`, `ESC [ 6~`)
/// - `Esc` and `Ctrl+C` cancel
///
/// ESC followed by a printable byte is Alt+key and ignored. ESC followed by a
/// control byte is an Esc press and the control byte keeps its meaning.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: Vec<u8>,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether bytes are buffered waiting for the rest of a unit.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Append a chunk and return every action it completes, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<KeyAction> {
        self.pending.extend_from_slice(chunk);
        self.drain(false)
    }

    /// Resolve whatever is pending because no more input is coming soon.
    ///
    /// A lone ESC becomes `Cancel(Escape)`; a truncated sequence or character
    /// is discarded.
    pub fn flush(&mut self) -> Vec<KeyAction> {
        self.drain(true)
    }

    fn drain(&mut self, flush: bool) -> Vec<KeyAction> {
        let mut actions = Vec::new();
        let mut pos = 0;

        while pos < self.pending.len() {
            match parse(&self.pending[pos..]) {
                Parsed::Action(action, used) => {
                    tracing::trace!(?action, "decoded key");
                    actions.push(action);
                    pos += used;
                }
                Parsed::Ignored(used) => pos += used,
                Parsed::Incomplete if flush => {
                    if self.pending[pos..] == [ESC] {
                        actions.push(KeyAction::Cancel(CancelReason::Escape));
                    }
                    pos = self.pending.len();
                }
                Parsed::Incomplete => break,
            }
        }

        self.pending.drain(..pos);
        actions
    }
}

fn parse(bytes: &[u8]) -> Parsed {
    match bytes[0] {
        ESC => parse_escape(bytes),
        b'\r' | b'\n' => Parsed::Action(KeyAction::Submit, 1),
        0x7F | 0x08 => Parsed::Action(KeyAction::Backspace, 1),
        0x03 => Parsed::Action(KeyAction::Cancel(CancelReason::Interrupt), 1),
        0x10 => Parsed::Action(KeyAction::MoveUp, 1),
        0x0E => Parsed::Action(KeyAction::MoveDown, 1),
        0x00..=0x1F => Parsed::Ignored(1),
        _ => parse_char(bytes),
    }
}

fn parse_escape(bytes: &[u8]) -> Parsed {
    let Some(&next) = bytes.get(1) else {
        return Parsed::Incomplete;
    };
    match next {
        b'[' => parse_csi(bytes),
        b'O' => match bytes.get(2) {
            None => Parsed::Incomplete,
            Some(b'A') => Parsed::Action(KeyAction::MoveUp, 3),
            Some(b'B') => Parsed::Action(KeyAction::MoveDown, 3),
            Some(b'H') => Parsed::Action(KeyAction::First, 3),
            Some(b'F') => Parsed::Action(KeyAction::Last, 3),
            Some(_) => Parsed::Ignored(3),
        },
        // ESC before a control byte (including another ESC) was a real Esc
        // press; the control byte is decoded on its own
        0x00..=0x1F | 0x7F => Parsed::Action(KeyAction::Cancel(CancelReason::Escape), 1),
        // Alt+key
        _ => Parsed::Ignored(2),
    }
}

/// `ESC [ params intermediates final`
fn parse_csi(bytes: &[u8]) -> Parsed {
    let mut idx = 2;
    while idx < bytes.len() {
        match bytes[idx] {
            0x20..=0x3F => idx += 1,
            0x40..=0x7E => {
                let used = idx + 1;
                return match csi_action(&bytes[2..idx], bytes[idx]) {
                    Some(action) => Parsed::Action(action, used),
                    None => Parsed::Ignored(used),
                };
            }
            // malformed: drop what we have and resync on this byte
            _ => return Parsed::Ignored(idx),
        }
    }
    if bytes.len() >= MAX_SEQUENCE_LEN {
        Parsed::Ignored(bytes.len())
    } else {
        Parsed::Incomplete
    }
}

fn csi_action(params: &[u8], final_byte: u8) -> Option<KeyAction> {
    match final_byte {
        b'A' => Some(KeyAction::MoveUp),
        b'B' => Some(KeyAction::MoveDown),
        b'H' => Some(KeyAction::First),
        b'F' => Some(KeyAction::Last),
        b'~' => {
            let first = params.split(|&b| b == b';').next().unwrap_or_default();
            match first {
                b"1" | b"7" => Some(KeyAction::First),
                b"4" | b"8" => Some(KeyAction::Last),
                b"5" => Some(KeyAction::PageUp),
                b"6" => Some(KeyAction::PageDown),
                _ => None,
            }
        }
        _ => None,
    }
}

fn parse_char(bytes: &[u8]) -> Parsed {
    let width = match bytes[0] {
        0x20..=0x7E => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        // stray continuation byte or invalid lead
        _ => return Parsed::Ignored(1),
    };

    if bytes.len() < width {
        return if bytes[1..].iter().all(|b| b & 0xC0 == 0x80) {
            Parsed::Incomplete
        } else {
            Parsed::Ignored(1)
        };
    }

    match std::str::from_utf8(&bytes[..width]) {
        Ok(s) => match s.chars().next() {
            Some(ch) if !ch.is_control() => Parsed::Action(KeyAction::Insert(ch), width),
            _ => Parsed::Ignored(width),
        },
        Err(_) => Parsed::Ignored(1),
    }
}

// =============================================================================
// Tests
// =============================================================================
