//! Host input events.

use crate::input::keyboard::{KeyEvent, KeyModifiers};
use crate::input::pointer::PointerEvent;

/// A typed character, already translated by the host's keyboard layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharEvent {
    pub ch: char,
    pub modifiers: KeyModifiers,
}

impl CharEvent {
    /// Create a character event with no modifiers.
    #[must_use]
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            modifiers: KeyModifiers::empty(),
        }
    }
}

/// An input event delivered to the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Text input.
    Char(CharEvent),
    /// Non-text key or shortcut.
    Key(KeyEvent),
    /// Mouse or touch pointer.
    Pointer(PointerEvent),
    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
}

impl Event {
    /// Check if this is a key event.
    #[must_use]
    pub fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }

    /// Check if this is a pointer event.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer(_))
    }

    /// Get the key event if this is one.
    #[must_use]
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(e) => Some(e),
            _ => None,
        }
    }

    /// Get the pointer event if this is one.
    #[must_use]
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::Pointer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<char> for Event {
    fn from(ch: char) -> Self {
        Self::Char(CharEvent::new(ch))
    }
}

impl From<KeyEvent> for Event {
    fn from(event: KeyEvent) -> Self {
        Self::Key(event)
    }
}

impl From<PointerEvent> for Event {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}
