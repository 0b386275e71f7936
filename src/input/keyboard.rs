//! Key presses delivered by the host.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key press or pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0000_0001;
        /// Alt/Option.
        const ALT = 0b0000_0010;
        const CTRL = 0b0000_0100;
        /// Super/Meta/Command.
        const SUPER = 0b0000_1000;
    }
}

/// Editing and navigation keys.
///
/// Typed text arrives as [`CharEvent`](crate::input::CharEvent); `Char`
/// only carries the letter of a shortcut such as Ctrl+Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Backspace,
    Delete,
    Enter,
    Tab,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Unmodified key press.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    #[must_use]
    pub fn with_ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// Ctrl+`letter` without Alt, in either case. Shift is allowed so that
    /// Ctrl+Shift+Z still reads as a Z shortcut.
    #[must_use]
    pub fn is_ctrl_letter(&self, letter: char) -> bool {
        match self.code {
            KeyCode::Char(c) => self.ctrl() && !self.alt() && c.eq_ignore_ascii_case(&letter),
            _ => false,
        }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}
