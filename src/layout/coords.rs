//! Mapping between logical positions and surface coordinates.
//!
//! Three coordinate spaces meet here:
//!
//! - *logical*: [`Position`] (line, char column)
//! - *content*: visual row index and pixel x inside the unscrolled text
//!   block, alignment included
//! - *screen*: surface pixels, after the text-area origin and the
//!   viewport's scroll offsets are applied

use crate::config::TextAlign;
use crate::geometry::{Point, Rect};
use crate::layout::engine::LayoutEngine;
use crate::layout::line::LineLayout;
use crate::text::{Position, TextBuffer};
use crate::unicode::Direction;
use crate::viewport::Viewport;

/// Borrowed view of everything needed to place text on screen.
#[derive(Clone, Copy)]
pub struct TextGeometry<'a> {
    pub buffer: &'a TextBuffer,
    pub layout: &'a LayoutEngine,
    pub viewport: &'a Viewport,
    /// Text area in surface coordinates.
    pub area: Rect,
    pub alignment: TextAlign,
}

impl<'a> TextGeometry<'a> {
    #[must_use]
    pub fn new(
        buffer: &'a TextBuffer,
        layout: &'a LayoutEngine,
        viewport: &'a Viewport,
        area: Rect,
        alignment: TextAlign,
    ) -> Self {
        Self {
            buffer,
            layout,
            viewport,
            area,
            alignment,
        }
    }

    /// Offset of row `row` of `line` inside the text area.
    #[must_use]
    pub fn align_offset(&self, line: &LineLayout, row: usize) -> u32 {
        let width = line.row(row).map_or(0, |r| r.width);
        let slack = self.area.width.saturating_sub(width);
        let rtl = line.base_direction() == Direction::Rtl;
        match (self.alignment, rtl) {
            (TextAlign::Start, false) | (TextAlign::End, true) => 0,
            (TextAlign::Center, _) => slack / 2,
            (TextAlign::Start, true) | (TextAlign::End, false) => slack,
        }
    }

    /// Visual row and content x of the caret at `pos`.
    #[must_use]
    pub fn content_x(&self, pos: Position) -> (usize, u32) {
        let pos = self.buffer.clamp(pos);
        let line = self.layout.layout(self.buffer, pos.line);
        let (sub, x) = line.caret_x(pos.column);
        let row = self.layout.first_row(self.buffer, pos.line) + sub;
        (row, self.align_offset(&line, sub) + x)
    }

    /// Position nearest to content x `x` on visual row `row` (clamped).
    #[must_use]
    pub fn position_at(&self, row: usize, x: i32) -> Position {
        let (line_idx, sub) = self.layout.row_at(self.buffer, row);
        let line = self.layout.layout(self.buffer, line_idx);
        let offset = i32::try_from(self.align_offset(&line, sub)).unwrap_or(i32::MAX);
        let x = x.saturating_sub(offset);
        Position::new(line_idx, line.hit_col(sub, x))
    }

    /// Surface y of the top of visual row `row`.
    #[must_use]
    pub fn row_y(&self, row: usize) -> i32 {
        let delta = row as i64 - self.viewport.v_offset as i64;
        let y = i64::from(self.area.y) + delta * i64::from(self.layout.line_height());
        i32::try_from(y).unwrap_or(if delta < 0 { i32::MIN } else { i32::MAX })
    }

    /// Surface x of content x `x`.
    #[must_use]
    pub fn screen_x(&self, x: u32) -> i32 {
        let x = i32::try_from(x).unwrap_or(i32::MAX);
        self.area
            .x
            .saturating_add(x)
            .saturating_sub(self.viewport.h_offset)
    }

    /// Top of the caret at `pos` in surface coordinates.
    ///
    /// A position on a wrap boundary is drawn at the start of the next row.
    #[must_use]
    pub fn to_screen(&self, pos: Position) -> Point {
        let (row, x) = self.content_x(pos);
        Point::new(self.screen_x(x), self.row_y(row))
    }

    /// Position under a surface point.
    ///
    /// Points above or below the text snap to the first or last row.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Position {
        let line_height = i64::from(self.layout.line_height().max(1));
        let dy = i64::from(point.y) - i64::from(self.area.y);
        let row = (self.viewport.v_offset as i64 + dy.div_euclid(line_height)).max(0) as usize;
        let row = row.min(self.layout.total_rows(self.buffer).saturating_sub(1));
        let x = point
            .x
            .saturating_sub(self.area.x)
            .saturating_add(self.viewport.h_offset);
        self.position_at(row, x)
    }
}
