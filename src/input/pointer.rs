//! Pointer (mouse) event types.

use crate::geometry::Point;
use crate::input::keyboard::KeyModifiers;

/// Pointer button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary (left) button.
    #[default]
    Primary,
    /// Middle button.
    Middle,
    /// Secondary (right) button.
    Secondary,
    /// No button (for move and wheel events).
    None,
}

/// Kind of pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Button pressed.
    Press,
    /// Pointer moved.
    Move,
    /// Button released.
    Release,
    /// Wheel scrolled by `dx`/`dy` notches. Positive `dy` scrolls down.
    Wheel { dx: i32, dy: i32 },
}

/// A pointer event in host surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    /// Pointer location in pixels.
    pub position: Point,
    /// Button involved.
    pub button: PointerButton,
    /// Kind of event.
    pub kind: PointerEventKind,
    /// Modifier keys held.
    pub modifiers: KeyModifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub fn new(position: Point, button: PointerButton, kind: PointerEventKind) -> Self {
        Self {
            position,
            button,
            kind,
            modifiers: KeyModifiers::empty(),
        }
    }

    /// Create a primary-button press.
    #[must_use]
    pub fn press(x: i32, y: i32) -> Self {
        Self::new(Point::new(x, y), PointerButton::Primary, PointerEventKind::Press)
    }

    /// Create a primary-button release.
    #[must_use]
    pub fn release(x: i32, y: i32) -> Self {
        Self::new(
            Point::new(x, y),
            PointerButton::Primary,
            PointerEventKind::Release,
        )
    }

    /// Create a move event.
    #[must_use]
    pub fn move_to(x: i32, y: i32) -> Self {
        Self::new(Point::new(x, y), PointerButton::None, PointerEventKind::Move)
    }

    /// Create a wheel event.
    #[must_use]
    pub fn wheel(x: i32, y: i32, dx: i32, dy: i32) -> Self {
        Self::new(
            Point::new(x, y),
            PointerButton::None,
            PointerEventKind::Wheel { dx, dy },
        )
    }

    /// Set modifier keys.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if Shift is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    /// Check if this is a wheel event.
    #[must_use]
    pub fn is_wheel(&self) -> bool {
        matches!(self.kind, PointerEventKind::Wheel { .. })
    }
}
