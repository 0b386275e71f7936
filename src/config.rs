//! Editor configuration.

use crate::color::Rgba;
use crate::layout::WrapMode;
use crate::text::{DEFAULT_MAX_HISTORY_DEPTH, MergePolicy};
use crate::unicode::Direction;

/// Which typed characters the editor accepts.
#[derive(Clone, Copy, Debug, Default)]
pub enum CharFilter {
    /// Any printable character.
    #[default]
    Unrestricted,
    /// Digits, plus one leading sign at the very start of the text.
    Integer,
    /// Like `Integer`, plus a single decimal point.
    Decimal,
    /// Host-supplied predicate.
    Custom(fn(char) -> bool),
}

impl CharFilter {
    /// Check whether `ch` may be inserted at `column` of line `line_index`,
    /// whose current text is `line`.
    #[must_use]
    pub fn accepts(&self, ch: char, line: &str, line_index: usize, column: usize) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Custom(predicate) => predicate(ch),
            Self::Integer => Self::accepts_integer(ch, line, line_index, column),
            Self::Decimal => {
                if ch == '.' {
                    !line.contains('.') && !(column == 0 && line.starts_with(['+', '-']))
                } else {
                    Self::accepts_integer(ch, line, line_index, column)
                }
            }
        }
    }

    fn accepts_integer(ch: char, line: &str, line_index: usize, column: usize) -> bool {
        if ch.is_ascii_digit() {
            // Nothing may precede a sign.
            return !(column == 0 && line.starts_with(['+', '-']));
        }
        if ch == '+' || ch == '-' {
            return line_index == 0 && column == 0 && !line.starts_with(['+', '-']);
        }
        false
    }
}

/// Horizontal alignment of each visual row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Left for LTR paragraphs, right for RTL.
    #[default]
    Start,
    Center,
    /// Right for LTR paragraphs, left for RTL.
    End,
}

/// What happens to the selection when the editor gains focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusBehavior {
    /// Leave caret and selection as they were.
    #[default]
    Keep,
    /// Select the whole document.
    SelectAll,
}

/// Behavioural options.
#[derive(Clone, Copy, Debug)]
pub struct EditorOptions {
    /// Wrapping; `WrapMode::None` disables it.
    pub wrap: WrapMode,
    /// Accept Enter and multi-line paste.
    pub multi_line: bool,
    /// Accept edits.
    pub editable: bool,
    /// Draw the caret even when not editable.
    pub caret_visible_when_read_only: bool,
    /// Tab stop distance in characters.
    pub tab_width: usize,
    /// Undo depth; 0 disables undo.
    pub undo_max_depth: usize,
    /// Record edits for undo. Independent of the depth limit.
    pub undo_enabled: bool,
    pub accept: CharFilter,
    pub alignment: TextAlign,
    /// Paragraph base direction; `Neutral` detects it per line.
    pub direction: Direction,
    pub merge_policy: MergePolicy,
    pub focus_behavior: FocusBehavior,
    /// Whether select-all leaves the caret at the end of the document
    /// rather than at its start.
    pub select_moves_to_end: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            wrap: WrapMode::None,
            multi_line: true,
            editable: true,
            caret_visible_when_read_only: false,
            tab_width: 4,
            undo_max_depth: DEFAULT_MAX_HISTORY_DEPTH,
            undo_enabled: true,
            accept: CharFilter::Unrestricted,
            alignment: TextAlign::Start,
            direction: Direction::Ltr,
            merge_policy: MergePolicy::default(),
            focus_behavior: FocusBehavior::Keep,
            select_moves_to_end: true,
        }
    }
}

impl EditorOptions {
    /// Options for a single-line input field.
    #[must_use]
    pub fn single_line() -> Self {
        Self {
            multi_line: false,
            ..Self::default()
        }
    }
}

/// Colours used when rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorScheme {
    pub background: Rgba,
    pub read_only_background: Rgba,
    pub text: Rgba,
    pub selection_background: Rgba,
    pub selection_text: Rgba,
    pub caret: Rgba,
    pub border: Rgba,
    pub placeholder: Rgba,
}

impl Default for EditorScheme {
    fn default() -> Self {
        Self {
            background: Rgba::WHITE,
            read_only_background: Rgba::rgb(240, 240, 240),
            text: Rgba::BLACK,
            selection_background: Rgba::rgb(51, 153, 255),
            selection_text: Rgba::WHITE,
            caret: Rgba::BLACK,
            border: Rgba::GRAY,
            placeholder: Rgba::GRAY,
        }
    }
}
