//! Property-based tests for row wrapping.
//!
//! Every char is one 8px cell, so widths can be checked by counting.

use proptest::prelude::*;
use textedit::layout::{
    Font, LayoutParams, LayoutStrategy, LineLayout, MonospaceMeasurer, WrapMode, layout_line,
};

const CELL: u32 = 8;

fn lay_out(text: &str, mode: WrapMode, width: u32) -> LineLayout {
    let params = LayoutParams {
        strategy: LayoutStrategy::from_wrap(mode),
        wrap_width: width,
        ..LayoutParams::default()
    };
    layout_line(text, &params, &MonospaceMeasurer::default(), &Font::default())
}

/// Row width without the hanging whitespace at its end.
fn trimmed_width(line: &LineLayout, row: usize) -> u32 {
    let range = line.rows()[row].range.clone();
    let text = line.slice(range);
    CELL * text.trim_end().chars().count() as u32
}

fn sentence(max_word: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::string::string_regex(&format!("[a-z]{{1,{max_word}}}")).unwrap(), 1..12)
        .prop_map(|words| words.join(" "))
}

fn wrapped_mode() -> impl Strategy<Value = WrapMode> {
    prop::sample::select(vec![WrapMode::Char, WrapMode::Word])
}

// ============================================================================
// Row Invariants
// ============================================================================

proptest! {
    /// Rows are contiguous, non-empty and cover the whole line.
    #[test]
    fn rows_partition_the_line(
        text in sentence(12),
        mode in wrapped_mode(),
        cells in 1u32..20,
    ) {
        let line = lay_out(&text, mode, cells * CELL);
        let mut expected_start = 0;
        for row in line.rows() {
            prop_assert_eq!(row.range.start, expected_start);
            prop_assert!(row.range.end > row.range.start);
            expected_start = row.range.end;
        }
        prop_assert_eq!(expected_start, line.char_count());
    }

    /// Apart from hanging whitespace, no row is wider than the wrap width.
    #[test]
    fn rows_fit_the_wrap_width(
        text in sentence(12),
        mode in wrapped_mode(),
        cells in 1u32..20,
    ) {
        let width = cells * CELL;
        let line = lay_out(&text, mode, width);
        for row in 0..line.row_count() {
            prop_assert!(
                trimmed_width(&line, row) <= width,
                "row {} of {:?} at width {}",
                row,
                text,
                width
            );
        }
    }

    /// Char wrapping only breaks when the next cluster would not fit.
    #[test]
    fn char_wrap_is_greedy(text in sentence(12), cells in 1u32..20) {
        let width = cells * CELL;
        let line = lay_out(&text, WrapMode::Char, width);
        let rows = line.rows();
        for row in &rows[..rows.len() - 1] {
            prop_assert!(row.width + CELL > width);
        }
    }

    /// When every word fits, word wrapping never splits one.
    #[test]
    fn word_wrap_breaks_after_spaces(text in sentence(6), cells in 6u32..20) {
        let line = lay_out(&text, WrapMode::Word, cells * CELL);
        let chars: Vec<char> = text.chars().collect();
        for row in line.rows() {
            let start = row.range.start;
            prop_assert!(start == 0 || chars[start - 1] == ' ', "{:?} split at {}", text, start);
        }
    }

    /// A line exactly as wide as the wrap width stays on one row.
    #[test]
    fn exact_fit_does_not_wrap(n in 2usize..30, mode in wrapped_mode()) {
        let text = "x".repeat(n);
        let width = CELL * n as u32;
        prop_assert_eq!(lay_out(&text, mode, width).row_count(), 1);
        let short = lay_out(&text, mode, width - 1);
        prop_assert_eq!(short.row_count(), 2);
        prop_assert_eq!(short.rows()[1].range.clone(), n - 1..n);
    }
}

// ============================================================================
// Unwrapped
// ============================================================================

proptest! {
    /// Without wrapping every line is one row of its full width.
    #[test]
    fn unwrapped_is_one_row(text in sentence(12), cells in 1u32..20) {
        let line = lay_out(&text, WrapMode::None, cells * CELL);
        prop_assert_eq!(line.row_count(), 1);
        prop_assert_eq!(line.width(), CELL * text.chars().count() as u32);
    }
}
