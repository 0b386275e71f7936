//! Undo/redo history.
//!
//! Each entry is an [`EditCommand`]: a closed set of edits that know how to
//! invert and reapply themselves against a [`TextBuffer`]. Consecutive
//! typing and deleting coalesce into one entry according to a
//! [`MergePolicy`]; [`History::seal`] closes the current entry so the next
//! edit starts a fresh one.

use std::collections::VecDeque;

use crate::event::{LogLevel, log_at};
use crate::text::buffer::{Position, TextBuffer, TextRange};

/// Default maximum number of undo entries to retain.
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 1000;

/// Rules for coalescing consecutive edits into one undo entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergePolicy {
    /// An entry stops growing once it holds this many chars.
    pub max_chars: usize,
    /// Start a new entry when a word begins after whitespace.
    pub break_on_whitespace: bool,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            max_chars: 64,
            break_on_whitespace: true,
        }
    }
}

/// Caret and selection to apply after undo or redo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaretRestore {
    pub anchor: Position,
    pub active: Position,
}

impl CaretRestore {
    /// A collapsed caret.
    #[must_use]
    pub const fn caret(pos: Position) -> Self {
        Self {
            anchor: pos,
            active: pos,
        }
    }

    /// A selection from `anchor` to `active`.
    #[must_use]
    pub const fn selection(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// Check if this is a plain caret without selection.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.active
    }
}

/// A reversible edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditCommand {
    /// Text removed by backspace, forward delete or selection delete.
    Backspace {
        /// Start of the removed text.
        at: Position,
        removed: String,
        /// `true` for forward delete.
        forward: bool,
        /// Caret and selection before the first merged delete.
        before: CaretRestore,
    },
    /// Text inserted at `origin`, optionally replacing a selection.
    InsertText {
        origin: Position,
        text: String,
        replaced: String,
        before: CaretRestore,
    },
    /// A selection dragged to another place.
    MoveText {
        source: TextRange,
        /// Insertion point in coordinates after `source` was removed.
        dest: Position,
        text: String,
        before: CaretRestore,
    },
}

impl EditCommand {
    /// Revert the edit and return the caret state it came from.
    pub fn undo(&self, buffer: &mut TextBuffer) -> CaretRestore {
        match self {
            Self::Backspace {
                at,
                removed,
                before,
                ..
            } => {
                buffer.insert(*at, removed);
                *before
            }
            Self::InsertText {
                origin,
                text,
                replaced,
                before,
            } => {
                buffer.erase(TextRange::new(*origin, origin.advanced_by(text)));
                buffer.insert(*origin, replaced);
                *before
            }
            Self::MoveText {
                source,
                dest,
                text,
                before,
            } => {
                buffer.erase(TextRange::new(*dest, dest.advanced_by(text)));
                buffer.insert(source.start, text);
                *before
            }
        }
    }

    /// Reapply the edit and return the caret state it leads to.
    pub fn redo(&self, buffer: &mut TextBuffer) -> CaretRestore {
        match self {
            Self::Backspace { at, removed, .. } => {
                buffer.erase(TextRange::new(*at, at.advanced_by(removed)));
                CaretRestore::caret(*at)
            }
            Self::InsertText {
                origin,
                text,
                replaced,
                ..
            } => {
                buffer.erase(TextRange::new(*origin, origin.advanced_by(replaced)));
                CaretRestore::caret(buffer.insert(*origin, text))
            }
            Self::MoveText {
                source, dest, text, ..
            } => {
                buffer.erase(*source);
                let end = buffer.insert(*dest, text);
                CaretRestore::selection(*dest, end)
            }
        }
    }

    /// Try to fold `next` into `self`. Returns `true` when merged.
    pub fn try_merge(&mut self, next: &Self, policy: &MergePolicy) -> bool {
        match (self, next) {
            (
                Self::InsertText {
                    origin,
                    text,
                    replaced: _,
                    before: _,
                },
                Self::InsertText {
                    origin: next_origin,
                    text: next_text,
                    replaced: next_replaced,
                    ..
                },
            ) => {
                if !next_replaced.is_empty() || *next_origin != origin.advanced_by(text) {
                    return false;
                }
                let mut chars = next_text.chars();
                let (Some(ch), None) = (chars.next(), chars.next()) else {
                    return false;
                };
                if ch == '\n' || text.chars().count() >= policy.max_chars {
                    return false;
                }
                if policy.break_on_whitespace
                    && !ch.is_whitespace()
                    && text.chars().last().is_some_and(char::is_whitespace)
                {
                    return false;
                }
                text.push(ch);
                true
            }
            (
                Self::Backspace {
                    at,
                    removed,
                    forward,
                    before: CaretRestore { anchor, active },
                },
                Self::Backspace {
                    at: next_at,
                    removed: next_removed,
                    forward: next_forward,
                    before: next_before,
                },
            ) => {
                if forward != next_forward
                    || anchor != active
                    || !next_before.is_collapsed()
                    || removed.chars().count() >= policy.max_chars
                    || removed.contains('\n')
                    || next_removed.contains('\n')
                {
                    return false;
                }
                if *forward {
                    if next_at != at {
                        return false;
                    }
                    removed.push_str(next_removed);
                } else {
                    if next_at.advanced_by(next_removed) != *at {
                        return false;
                    }
                    removed.insert_str(0, next_removed);
                    *at = *next_at;
                }
                true
            }
            _ => false,
        }
    }
}

/// Bounded undo/redo stacks.
#[derive(Clone, Debug)]
pub struct History {
    undo: VecDeque<EditCommand>,
    redo: Vec<EditCommand>,
    max_depth: usize,
    policy: MergePolicy,
    sealed: bool,
    enabled: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_DEPTH, MergePolicy::default())
    }
}

impl History {
    /// Create a history with a depth limit and merge policy.
    #[must_use]
    pub fn new(max_depth: usize, policy: MergePolicy) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_depth,
            policy,
            sealed: true,
            enabled: true,
        }
    }

    /// Record an applied edit, merging it into the open entry when allowed.
    pub fn record(&mut self, command: EditCommand) {
        if !self.enabled || self.max_depth == 0 {
            return;
        }
        self.redo.clear();
        let merged = !self.sealed
            && self
                .undo
                .back_mut()
                .is_some_and(|last| last.try_merge(&command, &self.policy));
        if !merged {
            self.undo.push_back(command);
            self.evict();
        }
        self.sealed = false;
    }

    fn evict(&mut self) {
        let mut dropped = 0;
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
            dropped += 1;
        }
        if dropped > 0 {
            log_at!(
                LogLevel::Debug,
                "history: evicted {dropped} oldest entries (depth {})",
                self.max_depth
            );
        }
    }

    /// Close the open entry; the next edit starts a new one.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Revert the newest entry. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut TextBuffer) -> Option<CaretRestore> {
        let command = self.undo.pop_back()?;
        let restore = command.undo(buffer);
        self.redo.push(command);
        self.sealed = true;
        Some(restore)
    }

    /// Reapply the newest undone entry.
    pub fn redo(&mut self, buffer: &mut TextBuffer) -> Option<CaretRestore> {
        let command = self.redo.pop()?;
        let restore = command.redo(buffer);
        self.undo.push_back(command);
        self.evict();
        self.sealed = true;
        Some(restore)
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.sealed = true;
    }

    /// Change the depth limit. Zero disables recording and clears history.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        if max_depth == 0 {
            self.clear();
        } else {
            self.evict();
        }
    }

    /// Turn recording on or off. Turning it off drops all entries; the
    /// depth limit is kept for when it comes back on.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear();
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn set_policy(&mut self, policy: MergePolicy) {
        self.policy = policy;
        self.sealed = true;
    }

    #[must_use]
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Number of undo entries.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(history: &mut History, buffer: &mut TextBuffer, at: Position, text: &str) {
        buffer.insert(at, text);
        history.record(EditCommand::InsertText {
            origin: at,
            text: text.to_string(),
            replaced: String::new(),
            before: CaretRestore::caret(at),
        });
    }

    fn backspace(history: &mut History, buffer: &mut TextBuffer, caret: Position) -> Position {
        let at = Position::new(caret.line, caret.column - 1);
        let removed = buffer.erase(TextRange::new(at, caret));
        history.record(EditCommand::Backspace {
            at,
            removed,
            forward: false,
            before: CaretRestore::caret(caret),
        });
        at
    }

    #[test]
    fn test_typing_merges_into_one_entry() {
        let mut buffer = TextBuffer::new();
        let mut history = History::default();
        for (i, ch) in ["a", "b", "c"].iter().enumerate() {
            insert(&mut history, &mut buffer, Position::new(0, i), ch);
        }
        assert_eq!(history.depth(), 1);
        let restore = history.undo(&mut buffer).unwrap();
        assert_eq!(buffer.text(), "");
        assert_eq!(restore, CaretRestore::caret(Position::origin()));
    }

    #[test]
    fn test_backspaces_merge_backwards() {
        let mut buffer = TextBuffer::new();
        let mut history = History::default();
        for (i, ch) in ["a", "b", "c"].iter().enumerate() {
            insert(&mut history, &mut buffer, Position::new(0, i), ch);
        }
        let mut caret = Position::new(0, 3);
        for _ in 0..3 {
            caret = backspace(&mut history, &mut buffer, caret);
        }
        assert_eq!(buffer.text(), "");
        assert_eq!(history.depth(), 2);

        history.undo(&mut buffer);
        assert_eq!(buffer.text(), "abc");
        history.undo(&mut buffer);
        assert_eq!(buffer.text(), "");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_whitespace_breaks_merge() {
        let mut buffer = TextBuffer::new();
        let mut history = History::default();
        for (i, ch) in "ab cd".chars().enumerate() {
            insert(&mut history, &mut buffer, Position::new(0, i), &ch.to_string());
        }
        assert_eq!(history.depth(), 2);
        history.undo(&mut buffer);
        assert_eq!(buffer.text(), "ab ");
    }

    #[test]
    fn test_max_chars_breaks_merge() {
        let mut buffer = TextBuffer::new();
        let mut history = History::new(
            10,
            MergePolicy {
                max_chars: 2,
                break_on_whitespace: false,
            },
        );
        for (i, ch) in "abcde".chars().enumerate() {
            insert(&mut history, &mut buffer, Position::new(0, i), &ch.to_string());
        }
        assert_eq!(history.depth(), 3);
    }

    #[test]
    fn test_seal_prevents_merge() {
        let mut buffer = TextBuffer::new();
        let mut history = History::default();
        insert(&mut history, &mut buffer, Position::new(0, 0), "a");
        history.seal();
        insert(&mut history, &mut buffer, Position::new(0, 1), "b");
        assert_eq!(history.depth(), 2);
    }

    #[test]
    fn test_new_record_clears_redo() {
        let mut buffer = TextBuffer::new();
        let mut history = History::default();
        insert(&mut history, &mut buffer, Position::new(0, 0), "a");
        history.undo(&mut buffer);
        assert!(history.can_redo());
        insert(&mut history, &mut buffer, Position::new(0, 0), "b");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_redo_reapplies() {
        let mut buffer = TextBuffer::new();
        let mut history = History::default();
        insert(&mut history, &mut buffer, Position::new(0, 0), "hi\nthere");
        history.undo(&mut buffer);
        let restore = history.redo(&mut buffer).unwrap();
        assert_eq!(buffer.text(), "hi\nthere");
        assert_eq!(restore, CaretRestore::caret(Position::new(1, 5)));
        assert!(history.redo(&mut buffer).is_none());
    }

    #[test]
    fn test_depth_limit_evicts_oldest() {
        let mut buffer = TextBuffer::new();
        let mut history = History::new(2, MergePolicy::default());
        for i in 0..4 {
            history.seal();
            insert(&mut history, &mut buffer, Position::new(0, i), "x");
        }
        assert_eq!(history.depth(), 2);
        history.undo(&mut buffer);
        history.undo(&mut buffer);
        assert_eq!(buffer.text(), "xx");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_zero_depth_disables_and_clears() {
        let mut buffer = TextBuffer::new();
        let mut history = History::default();
        insert(&mut history, &mut buffer, Position::new(0, 0), "a");
        history.set_max_depth(0);
        assert_eq!(history.depth(), 0);
        insert(&mut history, &mut buffer, Position::new(0, 1), "b");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_disabling_keeps_depth_limit() {
        let mut buffer = TextBuffer::new();
        let mut history = History::new(3, MergePolicy::default());
        insert(&mut history, &mut buffer, Position::new(0, 0), "a");
        history.set_enabled(false);
        assert!(!history.can_undo());
        insert(&mut history, &mut buffer, Position::new(0, 1), "b");
        assert_eq!(history.depth(), 0);
        assert_eq!(history.max_depth(), 3);

        history.set_enabled(true);
        insert(&mut history, &mut buffer, Position::new(0, 2), "c");
        assert!(history.undo(&mut buffer).is_some());
        assert_eq!(buffer.text(), "ab");
    }

    #[test]
    fn test_replace_selection_restores_selection() {
        let mut buffer = TextBuffer::with_text("hello");
        let range = TextRange::new(Position::new(0, 2), Position::new(0, 5));
        let replaced = buffer.erase(range);
        buffer.insert(range.start, "X");
        let command = EditCommand::InsertText {
            origin: range.start,
            text: "X".to_string(),
            replaced,
            before: CaretRestore::selection(range.start, range.end),
        };
        assert_eq!(buffer.text(), "heX");
        let restore = command.undo(&mut buffer);
        assert_eq!(buffer.text(), "hello");
        assert_eq!(restore, CaretRestore::selection(range.start, range.end));
    }

    #[test]
    fn test_move_text_round_trip() {
        let mut buffer = TextBuffer::with_text("abc def");
        let source = TextRange::new(Position::new(0, 0), Position::new(0, 3));
        let command = EditCommand::MoveText {
            source,
            dest: Position::new(0, 4),
            text: "abc".to_string(),
            before: CaretRestore::selection(source.start, source.end),
        };
        let restore = command.redo(&mut buffer);
        assert_eq!(buffer.text(), " defabc");
        assert_eq!(
            restore,
            CaretRestore::selection(Position::new(0, 4), Position::new(0, 7))
        );
        command.undo(&mut buffer);
        assert_eq!(buffer.text(), "abc def");
    }

    #[test]
    fn test_forward_deletes_merge_in_place() {
        let mut buffer = TextBuffer::with_text("abc");
        let mut history = History::default();
        for _ in 0..2 {
            let at = Position::origin();
            let removed = buffer.erase(TextRange::new(at, Position::new(0, 1)));
            history.record(EditCommand::Backspace {
                at,
                removed,
                forward: true,
                before: CaretRestore::caret(at),
            });
        }
        assert_eq!(history.depth(), 1);
        history.undo(&mut buffer);
        assert_eq!(buffer.text(), "abc");
    }
}
