//! Caret and selection state.

use crate::text::buffer::{Position, TextRange};

/// How the current selection was made.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// No selection; only a caret.
    #[default]
    None,
    /// Made by dragging or shift-extending.
    Pointer,
    /// Made through the API.
    Programmatic,
    /// A selection that is being dragged to a new location.
    DragMove,
}

/// Anchor/active pair. The caret is the active end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
    pub mode: SelectionMode,
}

impl Selection {
    /// A collapsed caret at `pos`.
    #[must_use]
    pub const fn caret(pos: Position) -> Self {
        Self {
            anchor: pos,
            active: pos,
            mode: SelectionMode::None,
        }
    }

    /// Move the caret. With `reset_anchor` the selection collapses.
    pub fn set(&mut self, pos: Position, reset_anchor: bool) {
        self.active = pos;
        if reset_anchor {
            self.anchor = pos;
            self.mode = SelectionMode::None;
        }
    }

    /// Move the active end, keeping the anchor.
    pub fn extend_to(&mut self, pos: Position) {
        self.active = pos;
        if self.anchor == self.active {
            self.mode = SelectionMode::None;
        } else if self.mode == SelectionMode::None {
            self.mode = SelectionMode::Pointer;
        }
    }

    /// Select from `anchor` to `active`.
    pub fn select(&mut self, anchor: Position, active: Position, mode: SelectionMode) {
        self.anchor = anchor;
        self.active = active;
        self.mode = if anchor == active {
            SelectionMode::None
        } else {
            mode
        };
    }

    /// Collapse onto the active end.
    pub fn collapse(&mut self) {
        self.anchor = self.active;
        self.mode = SelectionMode::None;
    }

    /// Normalized selected range.
    #[must_use]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.anchor, self.active)
    }

    /// Check if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Caret position.
    #[must_use]
    pub fn caret_position(&self) -> Position {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_with_reset_collapses() {
        let mut sel = Selection::default();
        sel.select(Position::new(0, 1), Position::new(0, 4), SelectionMode::Programmatic);
        sel.set(Position::new(0, 2), true);
        assert!(sel.is_empty());
        assert_eq!(sel.mode, SelectionMode::None);
    }

    #[test]
    fn test_extend_keeps_anchor() {
        let mut sel = Selection::caret(Position::new(1, 3));
        sel.extend_to(Position::new(0, 1));
        assert_eq!(sel.anchor, Position::new(1, 3));
        assert_eq!(sel.mode, SelectionMode::Pointer);
        assert_eq!(
            sel.range(),
            TextRange::new(Position::new(0, 1), Position::new(1, 3))
        );
        sel.extend_to(Position::new(1, 3));
        assert_eq!(sel.mode, SelectionMode::None);
    }

    #[test]
    fn test_empty_select_is_none_mode() {
        let mut sel = Selection::default();
        sel.select(Position::new(0, 2), Position::new(0, 2), SelectionMode::Programmatic);
        assert_eq!(sel.mode, SelectionMode::None);
    }

    #[test]
    fn test_collapse_onto_active() {
        let mut sel = Selection::default();
        sel.select(Position::new(0, 5), Position::new(0, 2), SelectionMode::Pointer);
        sel.collapse();
        assert_eq!(sel.caret_position(), Position::new(0, 2));
        assert!(sel.is_empty());
    }
}
