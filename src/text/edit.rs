//! Editable text buffer with selection and undo/redo.
//!
//! This module provides [`EditBuffer`], which wraps a [`TextBuffer`] with
//! a [`Selection`] and a [`History`]. All logical editing goes through it so
//! that every buffer mutation is paired with its undo record in the same
//! call.
//!
//! # Examples
//!
//! ```
//! use textedit::{EditBuffer, Position, SelectionMode};
//!
//! let mut buf = EditBuffer::with_text("hello");
//! buf.select(Position::new(0, 2), Position::new(0, 5), SelectionMode::Programmatic);
//! buf.insert_text("X");
//! assert_eq!(buf.text(), "heX");
//!
//! buf.undo();
//! assert_eq!(buf.text(), "hello");
//! assert_eq!(buf.selected_text(), "llo");
//! ```

use crate::text::buffer::{Position, TextBuffer, TextRange, normalize_newlines};
use crate::text::history::{CaretRestore, EditCommand, History};
use crate::text::selection::{Selection, SelectionMode};
use crate::unicode::{
    cluster_boundaries, next_boundary, next_word_boundary, prev_boundary, prev_word_boundary,
};

/// Text buffer with editing operations, selection, and undo/redo.
#[derive(Clone, Debug, Default)]
pub struct EditBuffer {
    buffer: TextBuffer,
    selection: Selection,
    history: History,
}

impl EditBuffer {
    /// Create a new empty edit buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an edit buffer with initial text and the caret at the start.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: TextBuffer::with_text(text),
            ..Self::default()
        }
    }

    /// Replace the history (keeps depth limit and merge policy of `history`).
    #[must_use]
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Full document text.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Replace all content, reset the caret and clear history.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.selection = Selection::default();
        self.history.clear();
    }

    /// Caret position (active end of the selection).
    #[must_use]
    pub fn caret(&self) -> Position {
        self.selection.active
    }

    /// Move the caret. With `extend` the anchor stays put.
    ///
    /// Any caret move closes the open undo entry.
    pub fn set_caret(&mut self, pos: Position, extend: bool) {
        let pos = self.buffer.clamp(pos);
        if extend {
            self.selection.extend_to(pos);
        } else {
            self.selection.set(pos, true);
        }
        self.history.seal();
    }

    /// Select from `anchor` to `active`.
    pub fn select(&mut self, anchor: Position, active: Position, mode: SelectionMode) {
        let anchor = self.buffer.clamp(anchor);
        let active = self.buffer.clamp(active);
        self.selection.select(anchor, active, mode);
        self.history.seal();
    }

    /// Select the whole document.
    pub fn select_all(&mut self) {
        self.select(
            Position::origin(),
            self.buffer.end_position(),
            SelectionMode::Programmatic,
        );
    }

    /// Collapse the selection onto the caret.
    pub fn deselect(&mut self) {
        self.selection.collapse();
    }

    /// Change only the selection mode.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if !self.selection.is_empty() {
            self.selection.mode = mode;
        }
    }

    /// Currently selected text.
    #[must_use]
    pub fn selected_text(&self) -> String {
        self.buffer.slice(self.selection.range())
    }

    fn before(&self) -> CaretRestore {
        CaretRestore::selection(self.selection.anchor, self.selection.active)
    }

    fn apply_restore(&mut self, restore: CaretRestore) {
        let anchor = self.buffer.clamp(restore.anchor);
        let active = self.buffer.clamp(restore.active);
        self.selection.select(anchor, active, SelectionMode::Programmatic);
    }

    /// Insert text at the caret, replacing the selection.
    ///
    /// Returns `false` when nothing changed.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let text = normalize_newlines(text);
        if text.is_empty() && self.selection.is_empty() {
            return false;
        }
        let before = self.before();
        let range = self.selection.range();
        let replaced = if range.is_empty() {
            String::new()
        } else {
            self.buffer.erase(range)
        };
        let end = self.buffer.insert(range.start, &text);
        self.history.record(EditCommand::InsertText {
            origin: range.start,
            text: text.into_owned(),
            replaced,
            before,
        });
        self.selection = Selection::caret(end);
        true
    }

    fn erase_recorded(&mut self, range: TextRange, forward: bool) -> bool {
        if range.is_empty() {
            return false;
        }
        let before = self.before();
        let removed = self.buffer.erase(range);
        self.history.record(EditCommand::Backspace {
            at: range.start,
            removed,
            forward,
            before,
        });
        self.selection = Selection::caret(range.start);
        true
    }

    /// Delete the selected text.
    pub fn delete_selection(&mut self) -> bool {
        self.erase_recorded(self.selection.range(), false)
    }

    /// Delete the grapheme cluster before the caret, or the selection.
    pub fn backspace(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.delete_selection();
        }
        let caret = self.caret();
        let prev = self.prev_position(caret);
        self.erase_recorded(TextRange::new(prev, caret), false)
    }

    /// Delete the grapheme cluster after the caret, or the selection.
    pub fn delete_forward(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.delete_selection();
        }
        let caret = self.caret();
        let next = self.next_position(caret);
        self.erase_recorded(TextRange::new(caret, next), true)
    }

    /// Delete back to the start of the previous word.
    pub fn delete_word_backward(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.delete_selection();
        }
        let caret = self.caret();
        let target = self.word_left(caret);
        self.history.seal();
        let changed = self.erase_recorded(TextRange::new(target, caret), false);
        self.history.seal();
        changed
    }

    /// Delete forward to the end of the next word.
    pub fn delete_word_forward(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.delete_selection();
        }
        let caret = self.caret();
        let target = self.word_right(caret);
        self.history.seal();
        let changed = self.erase_recorded(TextRange::new(caret, target), true);
        self.history.seal();
        changed
    }

    /// Move the selected text so it starts at `dest` (given in current
    /// coordinates). Dropping inside the selection does nothing.
    pub fn move_selection_to(&mut self, dest: Position) -> bool {
        let source = self.selection.range();
        let dest = self.buffer.clamp(dest);
        if source.is_empty() || (dest >= source.start && dest <= source.end) {
            return false;
        }
        let command = EditCommand::MoveText {
            source,
            dest: source.shift_after_erase(dest),
            text: self.buffer.slice(source),
            before: self.before(),
        };
        let restore = command.redo(&mut self.buffer);
        self.history.seal();
        self.history.record(command);
        self.history.seal();
        self.apply_restore(restore);
        true
    }

    /// Undo the newest entry. Returns `false` when history is empty.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&mut self.buffer) {
            Some(restore) => {
                self.apply_restore(restore);
                true
            }
            None => false,
        }
    }

    /// Redo the newest undone entry.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&mut self.buffer) {
            Some(restore) => {
                self.apply_restore(restore);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Previous grapheme boundary, crossing to the end of the previous line.
    #[must_use]
    pub fn prev_position(&self, pos: Position) -> Position {
        let pos = self.buffer.clamp(pos);
        if pos.column == 0 {
            if pos.line == 0 {
                return pos;
            }
            let line = pos.line - 1;
            return Position::new(line, self.buffer.line_length(line));
        }
        let boundaries = cluster_boundaries(&self.buffer.line_text(pos.line));
        Position::new(pos.line, prev_boundary(&boundaries, pos.column))
    }

    /// Next grapheme boundary, crossing to the start of the next line.
    #[must_use]
    pub fn next_position(&self, pos: Position) -> Position {
        let pos = self.buffer.clamp(pos);
        if pos.column >= self.buffer.line_length(pos.line) {
            if pos.line + 1 >= self.buffer.line_count() {
                return pos;
            }
            return Position::new(pos.line + 1, 0);
        }
        let boundaries = cluster_boundaries(&self.buffer.line_text(pos.line));
        Position::new(pos.line, next_boundary(&boundaries, pos.column))
    }

    /// Start of the previous word.
    #[must_use]
    pub fn word_left(&self, pos: Position) -> Position {
        let pos = self.buffer.clamp(pos);
        if pos.column == 0 {
            return self.prev_position(pos);
        }
        let chars = self.buffer.line_chars(pos.line);
        Position::new(pos.line, prev_word_boundary(&chars, pos.column))
    }

    /// End of the next word.
    #[must_use]
    pub fn word_right(&self, pos: Position) -> Position {
        let pos = self.buffer.clamp(pos);
        if pos.column >= self.buffer.line_length(pos.line) {
            return self.next_position(pos);
        }
        let chars = self.buffer.line_chars(pos.line);
        Position::new(pos.line, next_word_boundary(&chars, pos.column))
    }
}
