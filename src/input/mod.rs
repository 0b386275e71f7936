//! Input events delivered by the host.
//!
//! The host translates its native window-system events into [`Event`]s and
//! feeds them to [`Editor::handle_event`](crate::Editor::handle_event).

mod event;
mod keyboard;
mod pointer;

pub use event::{CharEvent, Event};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use pointer::{PointerButton, PointerEvent, PointerEventKind};
