//! Scroll offsets and caret visibility.
//!
//! The viewport scrolls vertically by whole visual rows and horizontally by
//! pixels. It never looks at text; callers hand it the caret location and
//! the content extent, and it answers with the minimal offset change.

use crate::geometry::Size;

/// Scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Scrollable extent of the content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContentExtent {
    /// Total visual rows.
    pub rows: usize,
    /// Widest row in pixels, caret width included.
    pub width: u32,
    /// Rows are wrapped to the area; horizontal scrolling is off.
    pub wrapped: bool,
}

/// Scroll state of the text area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Horizontal scroll in pixels.
    pub h_offset: i32,
    /// First visible visual row.
    pub v_offset: usize,
    /// Remembered caret x for vertical motion, in content pixels.
    pub anchor_x: u32,
    /// Text area size.
    pub area: Size,
    /// Height of one visual row.
    pub line_height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::default(), 16)
    }
}

impl Viewport {
    #[must_use]
    pub fn new(area: Size, line_height: u32) -> Self {
        Self {
            h_offset: 0,
            v_offset: 0,
            anchor_x: 0,
            area,
            line_height: line_height.max(1),
        }
    }

    /// Number of fully visible rows (at least 1). Scrolling and paging
    /// work in these.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        (self.area.height / self.line_height.max(1)).max(1) as usize
    }

    /// Number of rows at least partly inside the area (at least 1).
    #[must_use]
    pub fn drawn_rows(&self) -> usize {
        self.area.height.div_ceil(self.line_height.max(1)).max(1) as usize
    }

    /// Inclusive range of rows to draw, clamped to the content. A partly
    /// visible bottom row is included.
    #[must_use]
    pub fn visible_row_range(&self, total_rows: usize) -> (usize, usize) {
        let last_row = total_rows.saturating_sub(1);
        let first = self.v_offset.min(last_row);
        let last = (self.v_offset + self.drawn_rows() - 1).min(last_row);
        (first, last)
    }

    fn max_v_offset(&self, content: &ContentExtent) -> usize {
        content.rows.saturating_sub(self.visible_rows())
    }

    fn max_h_offset(&self, content: &ContentExtent) -> i32 {
        if content.wrapped {
            0
        } else {
            i32::try_from(content.width.saturating_sub(self.area.width)).unwrap_or(i32::MAX)
        }
    }

    /// Keep the offsets inside the content. Returns `true` if anything moved.
    pub fn clamp(&mut self, content: &ContentExtent) -> bool {
        let v = self.v_offset.min(self.max_v_offset(content));
        let h = self.h_offset.clamp(0, self.max_h_offset(content));
        let changed = v != self.v_offset || h != self.h_offset;
        self.v_offset = v;
        self.h_offset = h;
        changed
    }

    /// Scroll the minimum needed to show the caret.
    ///
    /// `caret_x` is in content pixels (before horizontal scroll). Calling
    /// this twice in a row never moves the second time.
    pub fn ensure_visible(
        &mut self,
        caret_x: u32,
        caret_row: usize,
        caret_width: u32,
        content: &ContentExtent,
    ) -> bool {
        let before = (self.h_offset, self.v_offset);

        let visible = self.visible_rows();
        if caret_row < self.v_offset {
            self.v_offset = caret_row;
        } else if caret_row >= self.v_offset + visible {
            self.v_offset = caret_row + 1 - visible;
        }

        if content.wrapped {
            self.h_offset = 0;
        } else {
            let left = i64::from(caret_x);
            let right = left + i64::from(caret_width);
            let h = i64::from(self.h_offset);
            let width = i64::from(self.area.width);
            let target = if left < h {
                left
            } else if right > h + width {
                right - width
            } else {
                h
            };
            self.h_offset = i32::try_from(target.max(0)).unwrap_or(i32::MAX);
        }

        self.clamp(content);
        (self.h_offset, self.v_offset) != before
    }

    /// Scroll by `delta` rows (vertical) or pixels (horizontal).
    pub fn scroll(&mut self, delta: i32, axis: Axis, content: &ContentExtent) -> bool {
        match axis {
            Axis::Vertical => {
                let target = if delta < 0 {
                    self.v_offset.saturating_sub(delta.unsigned_abs() as usize)
                } else {
                    self.v_offset.saturating_add(delta as usize)
                };
                let target = target.min(self.max_v_offset(content));
                let changed = target != self.v_offset;
                self.v_offset = target;
                changed
            }
            Axis::Horizontal => {
                let target = self
                    .h_offset
                    .saturating_add(delta)
                    .clamp(0, self.max_h_offset(content));
                let changed = target != self.h_offset;
                self.h_offset = target;
                changed
            }
        }
    }

    /// Reset offsets, for example after the content is replaced.
    pub fn reset(&mut self) {
        self.h_offset = 0;
        self.v_offset = 0;
        self.anchor_x = 0;
    }
}
