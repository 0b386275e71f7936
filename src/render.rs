//! Rendering backend interface.
//!
//! The editor never touches pixels. It describes a frame as a sequence of
//! calls on a [`Surface`] supplied by the host. [`RecordingSurface`] keeps
//! those calls as [`DrawCommand`]s, which is handy for headless hosts and
//! for tests.

use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::unicode::Direction;

/// Drawing target provided by the host.
pub trait Surface {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Draw a run of text whose top-left corner is `origin`.
    ///
    /// `text` is in logical order; `direction` tells the backend whether to
    /// shape it right-to-left.
    fn draw_text(&mut self, origin: Point, text: &str, color: Rgba, direction: Direction);

    /// Outline a rectangle one pixel wide.
    fn draw_border(&mut self, rect: Rect, color: Rgba) {
        if rect.is_empty() {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - 1, rect.width, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.height), color);
        self.fill_rect(Rect::new(rect.right() - 1, rect.y, 1, rect.height), color);
    }
}

/// A recorded surface call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    Text {
        origin: Point,
        text: String,
        color: Rgba,
        direction: Direction,
    },
}

/// Surface that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text runs in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::FillRect { .. } => None,
        })
    }

    /// Rectangles filled with `color`.
    pub fn fills_with(&self, color: Rgba) -> impl Iterator<Item = Rect> + '_ {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_text(&mut self, origin: Point, text: &str, color: Rgba, direction: Direction) {
        self.commands.push(DrawCommand::Text {
            origin,
            text: text.to_string(),
            color,
            direction,
        });
    }
}
