//! Line-oriented text storage.
//!
//! This module provides [`TextBuffer`], a rope-backed document addressed by
//! [`Position`]s (line, column). Columns count Unicode scalar values. Every
//! line carries a *stamp*: a value drawn from a process-wide monotonically
//! increasing counter whenever the line is created or edited, so no two
//! buffers ever hand out the same stamp. Caches elsewhere in the
//! crate key their entries by stamp, so an edit invalidates exactly the
//! lines it touched without anyone walking the cache.
//!
//! # Examples
//!
//! ```
//! use textedit::{Position, TextBuffer, TextRange};
//!
//! let mut buffer = TextBuffer::with_text("hello");
//! let end = buffer.insert(Position::new(0, 5), " big\nworld");
//! assert_eq!(end, Position::new(1, 5));
//! assert_eq!(buffer.line_count(), 2);
//!
//! let removed = buffer.erase(TextRange::new(Position::new(0, 5), Position::new(1, 0)));
//! assert_eq!(removed, " big\n");
//! assert_eq!(buffer.text(), "helloworld");
//! ```

use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};

use ropey::Rope;

/// Logical caret coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line index (0-based).
    pub line: usize,
    /// Column in chars (0-based).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Start of the document.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Position reached after inserting `text` at `self`.
    #[must_use]
    pub fn advanced_by(self, text: &str) -> Self {
        match text.rfind('\n') {
            None => Self::new(self.line, self.column + text.chars().count()),
            Some(last_nl) => {
                let breaks = text.bytes().filter(|&b| b == b'\n').count();
                Self::new(self.line + breaks, text[last_nl + 1..].chars().count())
            }
        }
    }
}

/// A range between two positions with `start <= end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    /// Create a range; the endpoints may be given in either order.
    #[must_use]
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Check if the range is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if `pos` lies inside the range (end exclusive).
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Map `pos` into the coordinates that remain after this range is erased.
    ///
    /// Positions inside the range collapse onto its start.
    #[must_use]
    pub fn shift_after_erase(&self, pos: Position) -> Position {
        if pos <= self.start {
            pos
        } else if pos < self.end {
            self.start
        } else if pos.line == self.end.line {
            Position::new(
                self.start.line,
                self.start.column + (pos.column - self.end.column),
            )
        } else {
            Position::new(pos.line - (self.end.line - self.start.line), pos.column)
        }
    }
}

/// Replace `\r\n` and lone `\r` with `\n`.
#[must_use]
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Rope-backed document with per-line change stamps.
#[derive(Clone, Debug)]
pub struct TextBuffer {
    rope: Rope,
    stamps: Vec<u64>,
    revision: u64,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create a buffer holding one empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a buffer with initial text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut buffer = Self {
            rope: Rope::new(),
            stamps: Vec::new(),
            revision: 0,
        };
        buffer.set_text(text);
        buffer
    }

    fn fresh_stamp() -> u64 {
        static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);
        NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
    }

    /// Replace the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(&normalize_newlines(text));
        let lines = self.rope.len_lines();
        self.stamps.clear();
        for _ in 0..lines {
            let stamp = Self::fresh_stamp();
            self.stamps.push(stamp);
        }
        self.revision += 1;
    }

    /// Full text with `\n` line separators.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Total number of chars, line separators included.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if the document holds a single empty line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Number of lines (always at least 1).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of line `idx` without its terminator; empty when out of range.
    #[must_use]
    pub fn line_text(&self, idx: usize) -> Cow<'_, str> {
        if idx >= self.line_count() {
            return Cow::Borrowed("");
        }
        let slice = self.rope.line(idx);
        match slice.as_str() {
            Some(s) => Cow::Borrowed(s.strip_suffix('\n').unwrap_or(s)),
            None => {
                let mut s = slice.to_string();
                if s.ends_with('\n') {
                    s.pop();
                }
                Cow::Owned(s)
            }
        }
    }

    /// Chars of line `idx`.
    #[must_use]
    pub fn line_chars(&self, idx: usize) -> Vec<char> {
        self.line_text(idx).chars().collect()
    }

    /// Length of line `idx` in chars; 0 when out of range.
    #[must_use]
    pub fn line_length(&self, idx: usize) -> usize {
        if idx >= self.line_count() {
            return 0;
        }
        let line = self.rope.line(idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Change stamp of line `idx`; 0 when out of range.
    #[must_use]
    pub fn line_stamp(&self, idx: usize) -> u64 {
        self.stamps.get(idx).copied().unwrap_or(0)
    }

    /// Counter bumped on every mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Position after the last char.
    #[must_use]
    pub fn end_position(&self) -> Position {
        let line = self.line_count() - 1;
        Position::new(line, self.line_length(line))
    }

    /// Clamp a position into the document.
    #[must_use]
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.line_count() - 1);
        Position::new(line, pos.column.min(self.line_length(line)))
    }

    /// Char offset of a (clamped) position.
    #[must_use]
    pub fn position_to_char(&self, pos: Position) -> usize {
        let pos = self.clamp(pos);
        self.rope.line_to_char(pos.line) + pos.column
    }

    /// Position of a (clamped) char offset.
    #[must_use]
    pub fn char_to_position(&self, idx: usize) -> Position {
        let idx = idx.min(self.len_chars());
        let line = self.rope.char_to_line(idx);
        Position::new(line, idx - self.rope.line_to_char(line))
    }

    /// Text between two positions.
    #[must_use]
    pub fn slice(&self, range: TextRange) -> String {
        let start = self.position_to_char(range.start);
        let end = self.position_to_char(range.end);
        self.rope.slice(start..end).to_string()
    }

    /// Insert text and return the position just after it.
    ///
    /// Line breaks in `text` split the line; the whole insertion is a
    /// single rope edit.
    pub fn insert(&mut self, pos: Position, text: &str) -> Position {
        let pos = self.clamp(pos);
        if text.is_empty() {
            return pos;
        }
        let text = normalize_newlines(text);
        let char_idx = self.position_to_char(pos);
        self.rope.insert(char_idx, &text);

        let added = text.bytes().filter(|&b| b == b'\n').count();
        self.stamps[pos.line] = Self::fresh_stamp();
        let fresh: Vec<u64> = (0..added).map(|_| Self::fresh_stamp()).collect();
        self.stamps.splice(pos.line + 1..pos.line + 1, fresh);
        self.revision += 1;

        pos.advanced_by(&text)
    }

    /// Remove the text in `range` and return it.
    pub fn erase(&mut self, range: TextRange) -> String {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        let range = TextRange::new(start, end);
        if range.is_empty() {
            return String::new();
        }
        let from = self.position_to_char(range.start);
        let to = self.position_to_char(range.end);
        let removed = self.rope.slice(from..to).to_string();
        self.rope.remove(from..to);

        self.stamps.drain(range.start.line + 1..=range.end.line);
        self.stamps[range.start.line] = Self::fresh_stamp();
        self.revision += 1;

        removed
    }

    /// Break the line at `pos`.
    pub fn split_line(&mut self, pos: Position) -> Position {
        self.insert(pos, "\n")
    }

    /// Join line `idx` with the following line. Returns `false` on the last line.
    pub fn join_line(&mut self, idx: usize) -> bool {
        if idx + 1 >= self.line_count() {
            return false;
        }
        let end = Position::new(idx, self.line_length(idx));
        self.erase(TextRange::new(end, Position::new(idx + 1, 0)));
        true
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
