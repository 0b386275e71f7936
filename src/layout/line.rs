//! Layout of one logical line into visual rows.
//!
//! [`layout_line`] is a pure function of the line text, the layout
//! parameters and the measurer. It walks grapheme clusters greedily, breaks
//! rows when a cluster would overflow the wrap width, then reorders every
//! row independently with the Unicode BiDi algorithm and assigns pixel
//! offsets to the resulting [`TextSection`]s.

use std::borrow::Cow;
use std::ops::Range;

use crate::layout::measure::{Font, Measurer};
use crate::unicode::{BidiParagraph, Direction, TextSection, cluster_boundaries, cluster_indices};

/// Text wrapping mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// No wrapping - lines extend beyond the text area.
    #[default]
    None,
    /// Wrap at grapheme cluster boundaries.
    Char,
    /// Wrap after whitespace, falling back to clusters for long words.
    Word,
}

/// How lines are broken into rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutStrategy {
    /// Exactly one row per line.
    #[default]
    Unwrapped,
    /// Rows no wider than the wrap width.
    Wrapped(WrapMode),
}

impl LayoutStrategy {
    /// Strategy for a wrap mode; `WrapMode::None` means unwrapped.
    #[must_use]
    pub fn from_wrap(mode: WrapMode) -> Self {
        match mode {
            WrapMode::None => Self::Unwrapped,
            mode => Self::Wrapped(mode),
        }
    }

    #[must_use]
    pub fn is_wrapped(self) -> bool {
        matches!(self, Self::Wrapped(_))
    }

    #[must_use]
    pub fn wrap_mode(self) -> WrapMode {
        match self {
            Self::Unwrapped => WrapMode::None,
            Self::Wrapped(mode) => mode,
        }
    }
}

/// Inputs to [`layout_line`] besides the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutParams {
    pub strategy: LayoutStrategy,
    /// Maximum row width in pixels when wrapped.
    pub wrap_width: u32,
    /// Tab stop distance in average character widths.
    pub tab_width: usize,
    /// Paragraph base direction.
    pub direction: Direction,
    /// Display every char as this glyph.
    pub mask: Option<char>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            strategy: LayoutStrategy::Unwrapped,
            wrap_width: 0,
            tab_width: 4,
            direction: Direction::Ltr,
            mask: None,
        }
    }
}

/// One visual row of a line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisualLine {
    /// Logical char range covered by the row.
    pub range: Range<usize>,
    /// Direction runs in visual order, with pixel offsets.
    pub sections: Vec<TextSection>,
    /// Row width in pixels, hanging whitespace included.
    pub width: u32,
}

/// Laid-out line.
#[derive(Clone, Debug)]
pub struct LineLayout {
    text: String,
    rows: Vec<VisualLine>,
    /// Prefix sums of per-char advances (`char_count + 1` entries). A
    /// cluster's advance sits on its first char.
    offsets: Vec<u32>,
    boundaries: Vec<bool>,
    row_height: u32,
    base_direction: Direction,
}

/// Lay out `text` into visual rows.
#[must_use]
pub fn layout_line(
    text: &str,
    params: &LayoutParams,
    measurer: &dyn Measurer,
    font: &Font,
) -> LineLayout {
    let display: Cow<'_, str> = match params.mask {
        Some(mask) => Cow::Owned(text.chars().map(|_| mask).collect()),
        None => Cow::Borrowed(text),
    };
    let clusters: Vec<(usize, &str)> = cluster_indices(&display).collect();
    let char_count = display.chars().count();
    let mut advances = vec![0u32; char_count];

    let tab_stop = measurer
        .average_char_width(font)
        .saturating_mul(u32::try_from(params.tab_width).unwrap_or(u32::MAX))
        .max(1);
    let (wrap, word) = match params.strategy {
        LayoutStrategy::Unwrapped => (false, false),
        LayoutStrategy::Wrapped(WrapMode::Word) => (true, true),
        LayoutStrategy::Wrapped(_) => (true, false),
    };

    // Rows as ranges of cluster indices.
    let mut row_clusters: Vec<Range<usize>> = Vec::new();
    let mut row_start = 0usize;
    let mut x = 0u32;
    let mut last_break: Option<usize> = None;
    let mut i = 0usize;

    while i < clusters.len() {
        let (start, cluster) = clusters[i];
        let w = if cluster == "\t" {
            tab_stop - x % tab_stop
        } else {
            measurer.measure(cluster, font)
        };
        let is_ws = cluster.chars().all(char::is_whitespace);

        if wrap && i > row_start && x.saturating_add(w) > params.wrap_width && !(word && is_ws) {
            let at = if word {
                last_break.filter(|&b| b > row_start).unwrap_or(i)
            } else {
                i
            };
            row_clusters.push(row_start..at);
            row_start = at;
            x = 0;
            last_break = None;
            i = at;
            continue;
        }

        advances[start] = w;
        x = x.saturating_add(w);
        if word && is_ws {
            last_break = Some(i + 1);
        }
        i += 1;
    }
    row_clusters.push(row_start..clusters.len());

    let char_at = |k: usize| clusters.get(k).map_or(char_count, |&(start, _)| start);
    let para = BidiParagraph::new(&display, params.direction);
    let rows = row_clusters
        .into_iter()
        .map(|r| {
            let range = char_at(r.start)..char_at(r.end);
            let mut sections = para.line_sections(range.clone());
            let mut sx = 0u32;
            for section in &mut sections {
                section.width = advances[section.range()].iter().sum();
                section.x = sx;
                sx += section.width;
            }
            VisualLine {
                range,
                sections,
                width: sx,
            }
        })
        .collect();
    let base_direction = para.base_direction();
    let boundaries = cluster_boundaries(&display);
    let offsets = std::iter::once(0)
        .chain(advances.iter().scan(0u32, |sum, &w| {
            *sum = sum.saturating_add(w);
            Some(*sum)
        }))
        .collect();

    LineLayout {
        text: display.into_owned(),
        rows,
        offsets,
        boundaries,
        row_height: measurer.line_height(font),
        base_direction,
    }
}

impl LineLayout {
    /// Visual rows in top-to-bottom order.
    #[must_use]
    pub fn rows(&self) -> &[VisualLine] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, idx: usize) -> Option<&VisualLine> {
        self.rows.get(idx)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    /// Total height of all rows.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.row_height
            .saturating_mul(u32::try_from(self.rows.len()).unwrap_or(u32::MAX))
    }

    /// Widest row.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.rows.iter().map(|r| r.width).max().unwrap_or(0)
    }

    #[must_use]
    pub fn char_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Displayed text (masked when a mask is set).
    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.text
    }

    /// Displayed text of a char range.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> String {
        self.text
            .chars()
            .skip(range.start)
            .take(range.end.saturating_sub(range.start))
            .collect()
    }

    /// Resolved paragraph direction.
    #[must_use]
    pub fn base_direction(&self) -> Direction {
        self.base_direction
    }

    /// Grapheme boundary flags (`char_count + 1` entries).
    #[must_use]
    pub fn boundaries(&self) -> &[bool] {
        &self.boundaries
    }

    fn advance_sum(&self, range: Range<usize>) -> u32 {
        self.offsets[range.end] - self.offsets[range.start]
    }

    /// Row that displays the caret at `col`.
    ///
    /// A column on a wrap boundary belongs to the following row.
    #[must_use]
    pub fn row_of(&self, col: usize) -> usize {
        let col = col.min(self.char_count());
        self.rows
            .partition_point(|r| r.range.end <= col)
            .min(self.rows.len() - 1)
    }

    fn edge_x(&self, section: &TextSection, col: usize) -> u32 {
        let before = self.advance_sum(section.start..col);
        if section.is_rtl() {
            section.x + section.width - before
        } else {
            section.x + before
        }
    }

    /// Row and x offset (from the row's left edge) of the caret at `col`.
    #[must_use]
    pub fn caret_x(&self, col: usize) -> (usize, u32) {
        let col = col.min(self.char_count());
        let row_idx = self.row_of(col);
        let row = &self.rows[row_idx];
        let section = row.sections.iter().find(|s| s.contains(col)).or_else(|| {
            col.checked_sub(1)
                .and_then(|prev| row.sections.iter().find(|s| s.contains(prev)))
        });
        let x = section.map_or(0, |s| self.edge_x(s, col));
        (row_idx, x)
    }

    /// Column whose caret is nearest to `x` on row `row_idx`.
    #[must_use]
    pub fn hit_col(&self, row_idx: usize, x: i32) -> usize {
        let row_idx = row_idx.min(self.rows.len() - 1);
        let row = &self.rows[row_idx];
        let last = if row_idx + 1 == self.rows.len() || row.range.is_empty() {
            row.range.end
        } else {
            row.range.end - 1
        };

        // Section holding each column of the row, so every caret x below
        // is O(1) and the whole scan stays linear.
        let start = row.range.start;
        let mut owner: Vec<Option<&TextSection>> = vec![None; row.range.len()];
        for section in &row.sections {
            for col in section.range() {
                if let Some(slot) = col.checked_sub(start).and_then(|k| owner.get_mut(k)) {
                    slot.get_or_insert(section);
                }
            }
        }
        let section_at = |col: usize| {
            col.checked_sub(start)
                .and_then(|k| owner.get(k))
                .copied()
                .flatten()
        };

        let mut best = start;
        let mut best_dist = i64::MAX;
        for col in start..=last {
            if !self.boundaries[col] {
                continue;
            }
            let section = section_at(col).or_else(|| col.checked_sub(1).and_then(section_at));
            let cx = section.map_or(0, |s| self.edge_x(s, col));
            let dist = (i64::from(cx) - i64::from(x)).abs();
            if dist < best_dist {
                best = col;
                best_dist = dist;
            }
        }
        best
    }

    /// Pixel spans `(x, width)` covering `range` on row `row_idx`.
    ///
    /// Mixed-direction rows can yield several disjoint spans.
    #[must_use]
    pub fn range_spans(&self, row_idx: usize, range: Range<usize>) -> Vec<(u32, u32)> {
        let Some(row) = self.rows.get(row_idx) else {
            return Vec::new();
        };
        let mut spans = Vec::new();
        for section in &row.sections {
            let lo = range.start.max(section.start);
            let hi = range.end.min(section.end());
            if lo >= hi {
                continue;
            }
            let width = self.advance_sum(lo..hi);
            let x = if section.is_rtl() {
                section.x + section.width - self.advance_sum(section.start..hi)
            } else {
                section.x + self.advance_sum(section.start..lo)
            };
            spans.push((x, width));
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::MonospaceMeasurer;

    fn params(strategy: LayoutStrategy, wrap_width: u32) -> LayoutParams {
        LayoutParams {
            strategy,
            wrap_width,
            ..LayoutParams::default()
        }
    }

    fn lay(text: &str, p: &LayoutParams) -> LineLayout {
        layout_line(text, p, &MonospaceMeasurer::default(), &Font::default())
    }

    fn ranges(layout: &LineLayout) -> Vec<Range<usize>> {
        layout.rows().iter().map(|r| r.range.clone()).collect()
    }

    #[test]
    fn test_unwrapped_single_row() {
        let layout = lay("hello", &LayoutParams::default());
        assert_eq!(layout.row_count(), 1);
        assert_eq!(layout.width(), 40);
        assert_eq!(layout.height(), 16);
    }

    #[test]
    fn test_empty_line_has_one_row() {
        let layout = lay("", &params(LayoutStrategy::Wrapped(WrapMode::Char), 10));
        assert_eq!(ranges(&layout), vec![0..0]);
        assert_eq!(layout.caret_x(0), (0, 0));
        assert_eq!(layout.hit_col(0, 99), 0);
    }

    #[test]
    fn test_exact_fit_does_not_wrap() {
        let wrapped = LayoutStrategy::Wrapped(WrapMode::Char);
        assert_eq!(ranges(&lay("hello", &params(wrapped, 40))), vec![0..5]);
        assert_eq!(ranges(&lay("hello", &params(wrapped, 39))), vec![0..4, 4..5]);
    }

    #[test]
    fn test_word_wrap_breaks_after_space() {
        let p = params(LayoutStrategy::Wrapped(WrapMode::Word), 48);
        assert_eq!(ranges(&lay("hello world", &p)), vec![0..6, 6..11]);
    }

    #[test]
    fn test_word_wrap_whitespace_hangs() {
        let p = params(LayoutStrategy::Wrapped(WrapMode::Word), 24);
        let layout = lay("ab   cd", &p);
        assert_eq!(ranges(&layout), vec![0..5, 5..7]);
        assert_eq!(layout.rows()[0].width, 40);
    }

    #[test]
    fn test_word_wrap_long_word_falls_back_to_clusters() {
        let p = params(LayoutStrategy::Wrapped(WrapMode::Word), 24);
        assert_eq!(ranges(&lay("abcdefgh", &p)), vec![0..3, 3..6, 6..8]);
    }

    #[test]
    fn test_wrap_keeps_clusters_whole() {
        let p = params(LayoutStrategy::Wrapped(WrapMode::Char), 8);
        let layout = lay("e\u{0301}e\u{0301}", &p);
        assert_eq!(ranges(&layout), vec![0..2, 2..4]);
    }

    #[test]
    fn test_narrow_width_keeps_one_cluster_per_row() {
        let p = params(LayoutStrategy::Wrapped(WrapMode::Char), 0);
        assert_eq!(ranges(&lay("abc", &p)), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_tab_advances_to_stop() {
        let layout = lay("a\tb", &LayoutParams::default());
        assert_eq!(layout.width(), 40);
        assert_eq!(layout.caret_x(2), (0, 32));
    }

    #[test]
    fn test_caret_on_wrap_boundary_starts_next_row() {
        let p = params(LayoutStrategy::Wrapped(WrapMode::Char), 24);
        let layout = lay("abcdef", &p);
        assert_eq!(layout.caret_x(2), (0, 16));
        assert_eq!(layout.caret_x(3), (1, 0));
        assert_eq!(layout.caret_x(6), (1, 24));
        assert_eq!(layout.hit_col(0, 100), 2);
        assert_eq!(layout.hit_col(1, 100), 6);
    }

    #[test]
    fn test_rtl_run_caret_positions() {
        // "abc " then three hebrew letters
        let layout = lay("abc אבג", &LayoutParams::default());
        let row = &layout.rows()[0];
        assert_eq!(row.sections.len(), 2);
        assert_eq!(row.sections[1].x, 32);
        assert_eq!(layout.caret_x(3), (0, 24));
        assert_eq!(layout.caret_x(4), (0, 56));
        assert_eq!(layout.caret_x(5), (0, 48));
        assert_eq!(layout.caret_x(7), (0, 32));
        assert_eq!(layout.hit_col(0, 50), 5);
        assert_eq!(layout.hit_col(0, 33), 7);
    }

    #[test]
    fn test_hit_col_on_long_mixed_line() {
        let text = "abc אבג ".repeat(2500);
        let layout = lay(&text, &LayoutParams::default());
        assert_eq!(layout.char_count(), 20_000);
        assert_eq!(layout.width(), 20_000 * 8);

        for col in [0, 1, 3, 4, 7, 8, 9_999, 19_996, 20_000] {
            let (_, x) = layout.caret_x(col);
            let hit = layout.hit_col(0, i32::try_from(x).unwrap());
            assert_eq!(layout.caret_x(hit).1, x, "col {col}");
        }
        assert_eq!(layout.hit_col(0, i32::MAX), layout.hit_col(0, 20_000 * 8));
        assert_eq!(layout.hit_col(0, -5), 0);
    }

    #[test]
    fn test_range_spans_rtl() {
        let layout = lay("abc אבג", &LayoutParams::default());
        assert_eq!(layout.range_spans(0, 0..2), vec![(0, 16)]);
        assert_eq!(layout.range_spans(0, 4..5), vec![(48, 8)]);
        assert_eq!(layout.range_spans(0, 2..6), vec![(16, 16), (40, 16)]);
    }

    #[test]
    fn test_mask_replaces_glyphs() {
        let p = LayoutParams {
            mask: Some('*'),
            ..LayoutParams::default()
        };
        let layout = lay("漢字x", &p);
        assert_eq!(layout.display_text(), "***");
        assert_eq!(layout.width(), 24);
    }

    #[test]
    fn test_rtl_paragraph_resolves_base() {
        let p = LayoutParams {
            direction: Direction::Neutral,
            ..LayoutParams::default()
        };
        assert_eq!(lay("אבג", &p).base_direction(), Direction::Rtl);
        assert_eq!(lay("abc", &p).base_direction(), Direction::Ltr);
    }
}
