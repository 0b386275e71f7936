//! Cached line layout for a whole document.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::rc::Rc;

use crate::event::{LogLevel, log_at};
use crate::layout::line::{LayoutParams, LayoutStrategy, LineLayout, WrapMode, layout_line};
use crate::layout::measure::{Font, Measurer, MonospaceMeasurer};
use crate::text::TextBuffer;
use crate::unicode::Direction;

/// Entries beyond `line_count * 2 + SLACK` trigger a sweep of stale stamps.
const CACHE_SLACK: usize = 64;

/// Lays out buffer lines on demand and caches the result per line stamp.
///
/// Edits give the touched lines fresh stamps, so their old entries simply
/// stop being hit. Configuration changes clear the whole cache. Stamps are
/// unique across buffers, so one engine may serve several of them.
pub struct LayoutEngine {
    measurer: Box<dyn Measurer>,
    font: Font,
    params: LayoutParams,
    cache: RefCell<HashMap<u64, Rc<LineLayout>>>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(Box::new(MonospaceMeasurer::default()))
    }
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("font", &self.font)
            .field("params", &self.params)
            .field("cached", &self.cache.borrow().len())
            .finish_non_exhaustive()
    }
}

impl LayoutEngine {
    #[must_use]
    pub fn new(measurer: Box<dyn Measurer>) -> Self {
        Self {
            measurer,
            font: Font::default(),
            params: LayoutParams::default(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    fn invalidate(&self, reason: &str) {
        let dropped = {
            let mut cache = self.cache.borrow_mut();
            let n = cache.len();
            cache.clear();
            n
        };
        if dropped > 0 {
            log_at!(
                LogLevel::Debug,
                "layout: cache cleared ({reason}), {dropped} entries dropped"
            );
        }
    }

    #[must_use]
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    #[must_use]
    pub fn font(&self) -> &Font {
        &self.font
    }

    #[must_use]
    pub fn measurer(&self) -> &dyn Measurer {
        self.measurer.as_ref()
    }

    #[must_use]
    pub fn strategy(&self) -> LayoutStrategy {
        self.params.strategy
    }

    #[must_use]
    pub fn is_wrapped(&self) -> bool {
        self.params.strategy.is_wrapped()
    }

    pub fn set_measurer(&mut self, measurer: Box<dyn Measurer>) {
        self.measurer = measurer;
        self.invalidate("measurer");
    }

    pub fn set_font(&mut self, font: Font) {
        if self.font != font {
            self.font = font;
            self.invalidate("font");
        }
    }

    pub fn set_wrap_mode(&mut self, mode: WrapMode) {
        let strategy = LayoutStrategy::from_wrap(mode);
        if self.params.strategy != strategy {
            self.params.strategy = strategy;
            self.invalidate("strategy");
        }
    }

    /// Change the wrap width. Only invalidates while wrapping.
    pub fn set_wrap_width(&mut self, width: u32) {
        if self.params.wrap_width != width {
            self.params.wrap_width = width;
            if self.is_wrapped() {
                self.invalidate("wrap width");
            }
        }
    }

    pub fn set_tab_width(&mut self, tab_width: usize) {
        let tab_width = tab_width.max(1);
        if self.params.tab_width != tab_width {
            self.params.tab_width = tab_width;
            self.invalidate("tab width");
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if self.params.direction != direction {
            self.params.direction = direction;
            self.invalidate("direction");
        }
    }

    pub fn set_mask(&mut self, mask: Option<char>) {
        if self.params.mask != mask {
            self.params.mask = mask;
            self.invalidate("mask");
        }
    }

    /// Height of one visual row.
    #[must_use]
    pub fn line_height(&self) -> u32 {
        self.measurer.line_height(&self.font).max(1)
    }

    #[must_use]
    pub fn average_char_width(&self) -> u32 {
        self.measurer.average_char_width(&self.font).max(1)
    }

    /// Width of `text` in the current font.
    #[must_use]
    pub fn measure(&self, text: &str) -> u32 {
        self.measurer.measure(text, &self.font)
    }

    /// Number of cached layouts.
    #[must_use]
    pub fn cached_lines(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Layout of line `line` (clamped), computed on first use.
    #[must_use]
    pub fn layout(&self, buffer: &TextBuffer, line: usize) -> Rc<LineLayout> {
        let line = line.min(buffer.line_count() - 1);
        let stamp = buffer.line_stamp(line);
        if let Some(layout) = self.cache.borrow().get(&stamp) {
            return Rc::clone(layout);
        }

        let layout = Rc::new(layout_line(
            &buffer.line_text(line),
            &self.params,
            self.measurer.as_ref(),
            &self.font,
        ));
        let mut cache = self.cache.borrow_mut();
        if cache.len() > buffer.line_count() * 2 + CACHE_SLACK {
            let live: HashSet<u64> = (0..buffer.line_count())
                .map(|i| buffer.line_stamp(i))
                .collect();
            cache.retain(|stamp, _| live.contains(stamp));
        }
        cache.insert(stamp, Rc::clone(&layout));
        layout
    }

    /// Number of visual rows of `line`.
    #[must_use]
    pub fn row_count(&self, buffer: &TextBuffer, line: usize) -> usize {
        if self.is_wrapped() {
            self.layout(buffer, line).row_count()
        } else {
            1
        }
    }

    /// Index of the first visual row of `line`.
    #[must_use]
    pub fn first_row(&self, buffer: &TextBuffer, line: usize) -> usize {
        let line = line.min(buffer.line_count() - 1);
        if self.is_wrapped() {
            (0..line).map(|l| self.row_count(buffer, l)).sum()
        } else {
            line
        }
    }

    /// Total visual rows in the document.
    #[must_use]
    pub fn total_rows(&self, buffer: &TextBuffer) -> usize {
        if self.is_wrapped() {
            (0..buffer.line_count())
                .map(|l| self.row_count(buffer, l))
                .sum()
        } else {
            buffer.line_count()
        }
    }

    /// Line and sub-row displayed at visual row `row` (clamped).
    #[must_use]
    pub fn row_at(&self, buffer: &TextBuffer, row: usize) -> (usize, usize) {
        let last_line = buffer.line_count() - 1;
        if !self.is_wrapped() {
            return (row.min(last_line), 0);
        }
        let mut remaining = row;
        for line in 0..=last_line {
            let rows = self.row_count(buffer, line);
            if remaining < rows {
                return (line, remaining);
            }
            remaining -= rows;
        }
        (last_line, self.row_count(buffer, last_line) - 1)
    }

    /// Widest row among `lines` (clamped to the document).
    ///
    /// Only the named lines are laid out, so callers pass what is on
    /// screen rather than the whole document.
    #[must_use]
    pub fn lines_width(&self, buffer: &TextBuffer, lines: Range<usize>) -> u32 {
        let end = lines.end.min(buffer.line_count());
        (lines.start.min(end)..end)
            .map(|l| self.layout(buffer, l).width())
            .max()
            .unwrap_or(0)
    }
}
