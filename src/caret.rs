//! Caret motion.
//!
//! Horizontal motion walks logical order one grapheme cluster (or word) at
//! a time, so it crosses sub-line and BiDi run boundaries without special
//! cases. Vertical motion works in visual rows and re-resolves the
//! remembered anchor x on the target row.

use crate::layout::TextGeometry;
use crate::text::{EditBuffer, Position};

/// A caret movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaretMotion {
    Left,
    Right,
    Up,
    Down,
    WordLeft,
    WordRight,
    /// Start of the logical line.
    LineStart,
    /// End of the logical line.
    LineEnd,
    PageUp,
    PageDown,
    DocumentStart,
    DocumentEnd,
}

impl CaretMotion {
    /// Motions that keep the remembered anchor x.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::PageUp | Self::PageDown)
    }
}

/// Where `motion` takes the caret.
///
/// With a selection and without `extend`, Left and Right collapse to the
/// selection's start or end instead of moving.
#[must_use]
pub fn target_position(
    edit: &EditBuffer,
    geometry: &TextGeometry<'_>,
    motion: CaretMotion,
    extend: bool,
    anchor_x: u32,
) -> Position {
    let caret = edit.caret();
    let buffer = edit.buffer();
    let selection = edit.selection();

    match motion {
        CaretMotion::Left if !extend && !selection.is_empty() => selection.range().start,
        CaretMotion::Right if !extend && !selection.is_empty() => selection.range().end,
        CaretMotion::Left => edit.prev_position(caret),
        CaretMotion::Right => edit.next_position(caret),
        CaretMotion::WordLeft => edit.word_left(caret),
        CaretMotion::WordRight => edit.word_right(caret),
        CaretMotion::LineStart => Position::new(caret.line, 0),
        CaretMotion::LineEnd => Position::new(caret.line, buffer.line_length(caret.line)),
        CaretMotion::DocumentStart => Position::origin(),
        CaretMotion::DocumentEnd => buffer.end_position(),
        CaretMotion::Up | CaretMotion::Down | CaretMotion::PageUp | CaretMotion::PageDown => {
            let (row, _) = geometry.content_x(caret);
            let total = geometry.layout.total_rows(buffer);
            let page = geometry.viewport.visible_rows();
            let target = match motion {
                CaretMotion::Up => row.checked_sub(1),
                CaretMotion::Down => Some(row + 1).filter(|&r| r < total),
                CaretMotion::PageUp => Some(row.saturating_sub(page)),
                _ => Some((row + page).min(total.saturating_sub(1))),
            };
            match target {
                Some(target) if target != row => {
                    geometry.position_at(target, i32::try_from(anchor_x).unwrap_or(i32::MAX))
                }
                _ => caret,
            }
        }
    }
}
