//! Drawing the editor onto a [`Surface`].

use std::ops::Range;

use super::Editor;
use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::highlight::HighlightStyle;
use crate::layout::{LineLayout, TextGeometry, VisualLine};
use crate::render::Surface;
use crate::text::TextRange;
use crate::unicode::Direction;

/// Selected columns of `line`, if the selection touches it.
fn selected_columns(
    selection: TextRange,
    line: usize,
    char_count: usize,
) -> Option<Range<usize>> {
    if selection.is_empty() || line < selection.start.line || line > selection.end.line {
        return None;
    }
    let start = if line == selection.start.line {
        selection.start.column
    } else {
        0
    };
    let end = if line == selection.end.line {
        selection.end.column
    } else {
        char_count
    };
    Some(start..end)
}

impl Editor {
    /// Draw the editor.
    ///
    /// Only visible rows are laid out and drawn. Text is emitted one
    /// direction run at a time, further split wherever the colour changes.
    pub fn render(&self, surface: &mut dyn Surface) {
        let scheme = &self.scheme;
        let background = if self.options.editable {
            scheme.background
        } else {
            scheme.read_only_background
        };
        surface.fill_rect(self.bounds, background);
        surface.draw_border(self.bounds, scheme.border);

        let area = self.text_area();
        if area.is_empty() {
            return;
        }
        let buffer = self.edit.buffer();

        if buffer.is_empty() && !self.focused {
            if let Some(placeholder) = &self.placeholder {
                surface.draw_text(
                    Point::new(area.x, area.y),
                    placeholder,
                    scheme.placeholder,
                    Direction::Ltr,
                );
            }
            return;
        }

        let geometry = self.geometry();
        let selection = self.edit.selection().range();
        let (first, last) = self.viewport.visible_row_range(self.layout.total_rows(buffer));
        for row in first..=last {
            let (line_idx, sub) = self.layout.row_at(buffer, row);
            let line = self.layout.layout(buffer, line_idx);
            let Some(visual) = line.row(sub) else {
                continue;
            };
            let selected = selected_columns(selection, line_idx, line.char_count());
            let colors = if self.mask.is_some() {
                vec![None; line.char_count()]
            } else {
                let text = buffer.line_text(line_idx);
                let spans = self.highlighter.find_spans(&text);
                self.highlighter.resolve_colors(line.char_count(), &spans)
            };
            let row_paint = RowPaint {
                geometry: &geometry,
                line: &line,
                sub,
                y: geometry.row_y(row),
                offset: geometry.align_offset(&line, sub),
                height: self.layout.line_height(),
            };
            row_paint.backgrounds(
                surface,
                visual,
                selected.clone(),
                &colors,
                scheme.selection_background,
            );
            row_paint.text(
                surface,
                visual,
                selected,
                &colors,
                scheme.text,
                scheme.selection_text,
            );
        }

        let show_caret = self.focused
            && (self.options.editable || self.options.caret_visible_when_read_only);
        if show_caret {
            let top = geometry.to_screen(self.edit.caret());
            surface.fill_rect(
                Rect::new(top.x, top.y, self.caret_width, self.layout.line_height()),
                scheme.caret,
            );
        }
    }
}

/// One visual row being painted.
struct RowPaint<'a> {
    geometry: &'a TextGeometry<'a>,
    line: &'a LineLayout,
    sub: usize,
    y: i32,
    /// Alignment offset of the row.
    offset: u32,
    height: u32,
}

impl RowPaint<'_> {
    fn fill_range(&self, surface: &mut dyn Surface, range: Range<usize>, color: Rgba) {
        for (x, width) in self.line.range_spans(self.sub, range) {
            let left = self.geometry.screen_x(self.offset + x);
            surface.fill_rect(Rect::new(left, self.y, width, self.height), color);
        }
    }

    /// Keyword backgrounds, then the selection on top.
    fn backgrounds(
        &self,
        surface: &mut dyn Surface,
        visual: &VisualLine,
        selected: Option<Range<usize>>,
        colors: &[Option<HighlightStyle>],
        selection_color: Rgba,
    ) {
        for (range, style) in runs(visual.range.clone(), |c| colors[c]) {
            if let Some(style) = style {
                if !style.background.is_transparent() {
                    self.fill_range(surface, range, style.background);
                }
            }
        }
        if let Some(selected) = selected {
            self.fill_range(surface, selected, selection_color);
        }
    }

    fn text(
        &self,
        surface: &mut dyn Surface,
        visual: &VisualLine,
        selected: Option<Range<usize>>,
        colors: &[Option<HighlightStyle>],
        text_color: Rgba,
        selected_color: Rgba,
    ) {
        let color_of = |c: usize| {
            if selected.as_ref().is_some_and(|s| s.contains(&c)) {
                selected_color
            } else {
                colors[c].map_or(text_color, |style| style.foreground)
            }
        };
        for section in &visual.sections {
            for (range, color) in runs(section.start..section.end(), &color_of) {
                let Some(&(x, _)) = self.line.range_spans(self.sub, range.clone()).first() else {
                    continue;
                };
                let origin = Point::new(self.geometry.screen_x(self.offset + x), self.y);
                surface.draw_text(origin, &self.line.slice(range), color, section.direction);
            }
        }
    }
}

/// Split `range` into maximal runs with equal `key`.
fn runs<T: PartialEq>(
    range: Range<usize>,
    key: impl Fn(usize) -> T,
) -> Vec<(Range<usize>, T)> {
    let mut out: Vec<(Range<usize>, T)> = Vec::new();
    for c in range {
        let k = key(c);
        match out.last_mut() {
            Some((run, last)) if *last == k => run.end = c + 1,
            _ => out.push((c..c + 1, k)),
        }
    }
    out
}
