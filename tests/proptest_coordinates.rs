//! Property-based tests for caret geometry and undo restoration.
//!
//! Uses proptest to verify invariants that must hold across all inputs,
//! including mixed-direction text.

use proptest::prelude::*;
use textedit::config::TextAlign;
use textedit::layout::{LayoutEngine, TextGeometry, WrapMode};
use textedit::viewport::{ContentExtent, Viewport};
use textedit::{Direction, EditBuffer, Position, Rect, SelectionMode, Size, TextBuffer};

// ============================================================================
// Strategies
// ============================================================================

/// Words in Latin, Hebrew and Arabic script, digits and combining marks.
fn word() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "hello", "abc", "x", "שלום", "עולם", "مرحبا", "123", "e\u{301}", "a-b", "(", ")",
    ])
    .prop_map(str::to_string)
}

fn line() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 0..8).prop_map(|words| words.join(" "))
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(line(), 1..4).prop_map(|lines| lines.join("\n"))
}

fn wrap_mode() -> impl Strategy<Value = WrapMode> {
    prop::sample::select(vec![WrapMode::None, WrapMode::Char, WrapMode::Word])
}

fn alignment() -> impl Strategy<Value = TextAlign> {
    prop::sample::select(vec![TextAlign::Start, TextAlign::Center, TextAlign::End])
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(vec![Direction::Ltr, Direction::Rtl, Direction::Neutral])
}

/// Every grapheme boundary of every line.
fn boundary_positions(buffer: &TextBuffer, layout: &LayoutEngine) -> Vec<Position> {
    (0..buffer.line_count())
        .flat_map(|line| {
            layout
                .layout(buffer, line)
                .boundaries()
                .iter()
                .enumerate()
                .filter(|(_, is_boundary)| **is_boundary)
                .map(move |(col, _)| Position::new(line, col))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[derive(Clone, Debug)]
enum Op {
    Type(String),
    Backspace,
    Delete,
    WordBackward,
    Caret(usize, usize),
    Select(usize, usize, usize, usize),
    MoveTo(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => "[a-z \n]{1,4}".prop_map(Op::Type),
        2 => Just(Op::Backspace),
        1 => Just(Op::Delete),
        1 => Just(Op::WordBackward),
        2 => (0..4usize, 0..12usize).prop_map(|(l, c)| Op::Caret(l, c)),
        1 => (0..4usize, 0..12usize, 0..4usize, 0..12usize)
            .prop_map(|(a, b, c, d)| Op::Select(a, b, c, d)),
        1 => (0..4usize, 0..12usize).prop_map(|(l, c)| Op::MoveTo(l, c)),
    ]
}

fn apply(edit: &mut EditBuffer, op: &Op) -> bool {
    match op {
        Op::Type(text) => edit.insert_text(text),
        Op::Backspace => edit.backspace(),
        Op::Delete => edit.delete_forward(),
        Op::WordBackward => edit.delete_word_backward(),
        Op::Caret(line, col) => {
            edit.set_caret(Position::new(*line, *col), false);
            false
        }
        Op::Select(a, b, c, d) => {
            edit.select(
                Position::new(*a, *b),
                Position::new(*c, *d),
                SelectionMode::Programmatic,
            );
            false
        }
        Op::MoveTo(line, col) => edit.move_selection_to(Position::new(*line, *col)),
    }
}

// ============================================================================
// Coordinate Round Trips
// ============================================================================

proptest! {
    /// Hit-testing the caret's own screen point lands on the same spot.
    #[test]
    fn screen_hit_screen_round_trip(
        text in document(),
        wrap in wrap_mode(),
        align in alignment(),
        dir in direction(),
        width in 40u32..240,
        h_offset in 0i32..64,
        v_offset in 0usize..3,
    ) {
        let buffer = TextBuffer::with_text(&text);
        let mut layout = LayoutEngine::default();
        layout.set_wrap_mode(wrap);
        layout.set_wrap_width(width);
        layout.set_direction(dir);
        let mut viewport = Viewport::new(Size::new(width, 64), layout.line_height());
        viewport.h_offset = if wrap == WrapMode::None { h_offset } else { 0 };
        viewport.v_offset = v_offset;
        let geometry = TextGeometry::new(
            &buffer,
            &layout,
            &viewport,
            Rect::new(5, 7, width, 64),
            align,
        );

        for pos in boundary_positions(&buffer, &layout) {
            let screen = geometry.to_screen(pos);
            let hit = geometry.hit_test(screen);
            prop_assert_eq!(
                geometry.to_screen(hit),
                screen,
                "{:?} hit back as {:?} in {:?}",
                pos,
                hit,
                text
            );
        }
    }

    /// Hit-testing always returns a position inside the document.
    #[test]
    fn hit_test_is_clamped(text in document(), x in -500i32..500, y in -500i32..500) {
        let buffer = TextBuffer::with_text(&text);
        let layout = LayoutEngine::default();
        let viewport = Viewport::new(Size::new(120, 64), layout.line_height());
        let area = Rect::new(0, 0, 120, 64);
        let geometry = TextGeometry::new(&buffer, &layout, &viewport, area, TextAlign::Start);
        let pos = geometry.hit_test(textedit::Point::new(x, y));
        prop_assert_eq!(buffer.clamp(pos), pos);
    }
}

// ============================================================================
// Undo Restoration
// ============================================================================

proptest! {
    /// Undoing everything restores the text and the caret before the first edit.
    #[test]
    fn undo_all_restores_buffer(
        start in "[a-z ]{0,12}(\n[a-z ]{0,12}){0,2}",
        ops in prop::collection::vec(op(), 1..40),
    ) {
        let mut edit = EditBuffer::with_text(&start);
        let mut before_first: Option<(Position, Position)> = None;
        for op in &ops {
            let selection = *edit.selection();
            if apply(&mut edit, op) && before_first.is_none() {
                before_first = Some((selection.anchor, selection.active));
            }
        }

        while edit.undo() {}
        prop_assert_eq!(edit.text(), start);
        if let Some((anchor, active)) = before_first {
            let selection = edit.selection();
            prop_assert_eq!((selection.anchor, selection.active), (anchor, active));
        }
    }

    /// Redoing everything after a full undo reproduces the edited text.
    #[test]
    fn redo_all_reapplies(start in "[a-z ]{0,12}", ops in prop::collection::vec(op(), 1..30)) {
        let mut edit = EditBuffer::with_text(&start);
        for op in &ops {
            apply(&mut edit, op);
        }
        let edited = edit.text();
        while edit.undo() {}
        while edit.redo() {}
        prop_assert_eq!(edit.text(), edited);
    }
}

// ============================================================================
// Viewport
// ============================================================================

proptest! {
    /// A second `ensure_visible` for the same caret never moves.
    #[test]
    fn ensure_visible_is_idempotent(
        rows in 1usize..200,
        content_width in 0u32..2000,
        wrapped in any::<bool>(),
        caret_row in 0usize..200,
        caret_x in 0u32..2000,
        h in 0i32..2000,
        v in 0usize..200,
    ) {
        let content = ContentExtent { rows, width: content_width, wrapped };
        let caret_row = caret_row.min(rows - 1);
        let caret_x = caret_x.min(content_width.saturating_sub(1));
        let mut viewport = Viewport::new(Size::new(160, 80), 16);
        viewport.h_offset = h;
        viewport.v_offset = v;
        viewport.ensure_visible(caret_x, caret_row, 1, &content);
        let settled = viewport;
        prop_assert!(!viewport.ensure_visible(caret_x, caret_row, 1, &content));
        prop_assert_eq!(viewport, settled);
    }
}
