use unicode_width::UnicodeWidthChar;

use crate::domain::model::{Highlight, PromptConfig, SelectionState};
use crate::domain::primitive::{CursorPos, Frame};
use crate::infrastructure::tui::widgets::theme::Theme;
use crate::usecase::prompt_usecase::Resolution;

/// Shown in place of the candidate list when nothing matches.
pub const NO_MATCHES: &str = "No matching choices";

/// Accumulates one display line while keeping track of its visible width,
/// so styling never counts towards truncation.
struct LineBuilder {
    out: String,
    used: usize,
    max: usize,
}

impl LineBuilder {
    /// `max == 0` means unbounded.
    fn new(max: usize) -> Self {
        Self {
            out: String::new(),
            used: 0,
            max: if max == 0 { usize::MAX } else { max },
        }
    }

    fn push(&mut self, text: &str) {
        self.push_styled(text, str::to_string);
    }

    /// Truncate `text` to the remaining width, then style what is left.
    fn push_styled(&mut self, text: &str, style: impl FnOnce(&str) -> String) {
        let remaining = self.max.saturating_sub(self.used);
        if remaining == 0 || text.is_empty() {
            return;
        }
        let (visible, width) = truncate(text, remaining);
        if !visible.is_empty() {
            self.out.push_str(&style(visible));
            self.used += width;
        }
    }

    fn width(&self) -> usize {
        self.used
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Longest prefix of `text` that fits in `max` columns, with its width.
fn truncate(text: &str, max: usize) -> (&str, usize) {
    let mut width = 0;
    for (byte_idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if width + w > max {
            return (&text[..byte_idx], width);
        }
        width += w;
    }
    (text, width)
}

/// Split `text` into maximal runs of matched / unmatched characters.
fn runs<'t>(text: &'t str, positions: &[usize]) -> Vec<(&'t str, bool)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
        let matched = positions.binary_search(&char_idx).is_ok();
        match current {
            Some(prev) if prev == matched => {}
            Some(prev) => {
                runs.push((&text[start..byte_idx], prev));
                start = byte_idx;
                current = Some(matched);
            }
            None => current = Some(matched),
        }
    }
    if let Some(prev) = current {
        runs.push((&text[start..], prev));
    }
    runs
}

/// Render the live prompt: the message line followed by the visible window
/// of candidates, or the no-match line.
///
/// Pure: identical inputs always give an identical frame. The hardware
/// cursor rests after the typed buffer on the message line.
pub fn render<V>(
    config: &PromptConfig<V>,
    selection: &SelectionState,
    theme: &Theme,
    width: u16,
) -> Frame {
    let max = usize::from(width);
    let mut lines = Vec::with_capacity(selection.limit() + 1);

    let mut header = LineBuilder::new(max);
    header.push_styled(Theme::PREFIX, |_| theme.prefix());
    header.push(" ");
    header.push_styled(config.message(), |s| theme.message(s));
    header.push(" ");
    header.push_styled(Theme::SEPARATOR, |_| theme.separator());
    header.push(" ");
    header.push(selection.input());
    let cursor_col = header.width();
    lines.push(header.finish());

    if selection.filtered().is_empty() {
        let mut line = LineBuilder::new(max);
        line.push("  ");
        line.push_styled(NO_MATCHES, |s| theme.dim(s));
        lines.push(line.finish());
    }

    let cursor_row = selection.cursor();
    for (row, entry) in selection.visible() {
        let Some(choice) = config.choice(entry.id) else {
            continue;
        };
        let mut line = LineBuilder::new(max);
        line.push_styled(Theme::POINTER, |_| theme.pointer(cursor_row == Some(row)));
        line.push(" ");
        push_highlighted(&mut line, choice.message(), selection.input(), config);
        if let Some(hint) = choice.hint() {
            line.push(" ");
            line.push_styled(hint, |s| theme.dim(s));
        }
        lines.push(line.finish());
    }

    let col = match max {
        0 => cursor_col,
        max => cursor_col.min(max - 1),
    };
    Frame::new(
        lines,
        Some(CursorPos {
            row: 0,
            col: u16::try_from(col).unwrap_or(u16::MAX),
        }),
    )
}

/// Push a candidate's display text, passing each matched run through the
/// configured highlight transform.
fn push_highlighted<V>(
    line: &mut LineBuilder,
    display: &str,
    input: &str,
    config: &PromptConfig<V>,
) {
    let highlight: &dyn Highlight = match config.highlight() {
        Some(h) if !input.is_empty() => h,
        _ => {
            line.push(display);
            return;
        }
    };
    let positions = config
        .matcher()
        .match_text(input, display)
        .map(|m| m.positions)
        .unwrap_or_default();

    for (segment, matched) in runs(display, &positions) {
        if matched {
            line.push_styled(segment, |s| highlight.highlight(s));
        } else {
            line.push(segment);
        }
    }
}

/// Render the single line left on screen after a run ends.
pub fn render_summary<V>(
    config: &PromptConfig<V>,
    resolution: Resolution,
    theme: &Theme,
    width: u16,
) -> Frame {
    let mut line = LineBuilder::new(usize::from(width));
    match resolution {
        Resolution::Submitted(id) => {
            line.push_styled(Theme::SUCCESS, |_| theme.success());
            line.push(" ");
            line.push_styled(config.message(), |s| theme.message(s));
            line.push(" ");
            line.push_styled(Theme::ANSWER_SEPARATOR, |s| theme.dim(s));
            line.push(" ");
            let answer = config.choice(id).map(|c| c.message()).unwrap_or_default();
            line.push_styled(answer, |s| theme.answer(s));
        }
        Resolution::Cancelled(_) => {
            line.push_styled(Theme::FAILURE, |_| theme.failure());
            line.push(" ");
            line.push_styled(config.message(), |s| theme.message(s));
        }
    }
    Frame::new(vec![line.finish()], None)
}

// =============================================================================
// Tests
// =============================================================================
