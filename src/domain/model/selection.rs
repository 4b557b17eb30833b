use std::fmt;
use std::sync::Arc;

use crate::domain::matcher::{self, FilteredChoice, Matcher};
use crate::domain::primitive::{CancelReason, ChoiceId, KeyAction};

/// Outcome of applying one action to a [`SelectionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed; a redraw is due.
    Changed,
    /// Action accepted but nothing changed (or action ignored).
    Unchanged,
    Submitted(ChoiceId),
    Cancelled(CancelReason),
}

/// Typed buffer, filtered view, cursor and scroll window of one prompt run.
///
/// Invariants held after every transition:
/// - `filtered` is exactly `filter(matcher, input, keys)`;
/// - when `filtered` is non-empty, `cursor < filtered.len()`;
/// - the cursor row lies inside `scroll..scroll + limit`.
#[derive(Clone)]
pub struct SelectionState {
    keys: Vec<String>,
    matcher: Arc<dyn Matcher>,
    input: String,
    filtered: Vec<FilteredChoice>,
    cursor: usize,
    scroll: usize,
    limit: usize,
}

impl SelectionState {
    /// Start with an empty buffer, every key visible and the cursor on
    /// `initial` (clamped to the key list).
    pub fn new(keys: Vec<String>, matcher: Arc<dyn Matcher>, limit: usize, initial: usize) -> Self {
        let filtered = matcher::filter(matcher.as_ref(), "", &keys);
        let cursor = initial.min(filtered.len().saturating_sub(1));
        let mut state = Self {
            keys,
            matcher,
            input: String::new(),
            filtered,
            cursor,
            scroll: 0,
            limit: limit.max(1),
        };
        state.ensure_visible();
        state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn filtered(&self) -> &[FilteredChoice] {
        &self.filtered
    }

    /// Cursor row within the filtered list; `None` when nothing matches.
    pub fn cursor(&self) -> Option<usize> {
        if self.filtered.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    /// Choice under the cursor.
    pub fn selected(&self) -> Option<ChoiceId> {
        self.cursor().map(|row| self.filtered[row].id)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Rows inside the visible window as `(row, choice)` pairs.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &FilteredChoice)> {
        self.filtered
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(self.limit)
    }

    pub fn apply(&mut self, action: KeyAction) -> Transition {
        match action {
            KeyAction::Insert(ch) => self.insert(ch),
            KeyAction::Backspace => self.backspace(),
            KeyAction::MoveUp => self.move_up(),
            KeyAction::MoveDown => self.move_down(),
            KeyAction::PageUp => self.page_up(),
            KeyAction::PageDown => self.page_down(),
            KeyAction::First => self.first(),
            KeyAction::Last => self.last(),
            KeyAction::Submit => self.submit(),
            KeyAction::Cancel(reason) => self.cancel(reason),
        }
    }

    /// Append `ch` and refilter. The cursor is kept when it still points at
    /// a row, otherwise it returns to the top.
    pub fn insert(&mut self, ch: char) -> Transition {
        self.input.push(ch);
        self.refilter();
        if self.cursor >= self.filtered.len() {
            self.cursor = 0;
        }
        self.ensure_visible();
        Transition::Changed
    }

    /// Drop the last character and refilter, clamping the cursor.
    pub fn backspace(&mut self) -> Transition {
        if self.input.pop().is_none() {
            return Transition::Unchanged;
        }
        self.refilter();
        self.cursor = self.cursor.min(self.filtered.len().saturating_sub(1));
        self.ensure_visible();
        Transition::Changed
    }

    /// Move up one row, wrapping from the top to the bottom.
    pub fn move_up(&mut self) -> Transition {
        let len = self.filtered.len();
        if len == 0 {
            return Transition::Unchanged;
        }
        let target = self.cursor.checked_sub(1).unwrap_or(len - 1);
        self.move_to(target)
    }

    /// Move down one row, wrapping from the bottom to the top.
    pub fn move_down(&mut self) -> Transition {
        let len = self.filtered.len();
        if len == 0 {
            return Transition::Unchanged;
        }
        self.move_to((self.cursor + 1) % len)
    }

    /// Move up one window, stopping at the first row.
    pub fn page_up(&mut self) -> Transition {
        if self.filtered.is_empty() {
            return Transition::Unchanged;
        }
        self.move_to(self.cursor.saturating_sub(self.limit))
    }

    /// Move down one window, stopping at the last row.
    pub fn page_down(&mut self) -> Transition {
        let len = self.filtered.len();
        if len == 0 {
            return Transition::Unchanged;
        }
        self.move_to((self.cursor + self.limit).min(len - 1))
    }

    pub fn first(&mut self) -> Transition {
        if self.filtered.is_empty() {
            return Transition::Unchanged;
        }
        self.move_to(0)
    }

    pub fn last(&mut self) -> Transition {
        let len = self.filtered.len();
        if len == 0 {
            return Transition::Unchanged;
        }
        self.move_to(len - 1)
    }

    /// Confirm the row under the cursor. Ignored when nothing matches.
    pub fn submit(&self) -> Transition {
        match self.selected() {
            Some(id) => Transition::Submitted(id),
            None => Transition::Unchanged,
        }
    }

    pub fn cancel(&self, reason: CancelReason) -> Transition {
        Transition::Cancelled(reason)
    }

    fn move_to(&mut self, target: usize) -> Transition {
        if target == self.cursor {
            return Transition::Unchanged;
        }
        self.cursor = target;
        self.ensure_visible();
        Transition::Changed
    }

    fn refilter(&mut self) {
        self.filtered = matcher::filter(self.matcher.as_ref(), &self.input, &self.keys);
    }

    /// Scroll the minimum distance that keeps the cursor row in the window.
    fn ensure_visible(&mut self) {
        let len = self.filtered.len();
        if len == 0 {
            self.cursor = 0;
            self.scroll = 0;
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.limit {
            self.scroll = self.cursor + 1 - self.limit;
        }
        self.scroll = self.scroll.min(len.saturating_sub(self.limit));
    }
}

impl fmt::Debug for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionState")
            .field("input", &self.input)
            .field("filtered", &self.filtered)
            .field("cursor", &self.cursor())
            .field("scroll", &self.scroll)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl PartialEq for SelectionState {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
            && self.input == other.input
            && self.filtered == other.filtered
            && self.cursor == other.cursor
            && self.scroll == other.scroll
            && self.limit == other.limit
    }
}
