//! `textedit` - embeddable rich-text editing engine
//!
//! A headless editor core: a rope-backed text buffer with per-line change
//! stamps, BiDi-aware line layout with wrapping, keyword highlighting,
//! caret and selection handling, merged undo/redo and a scrolling
//! viewport. The host supplies text measurement, a drawing surface and a
//! clipboard; the [`Editor`] façade does the rest.
//!
//! # Examples
//!
//! ```
//! use textedit::{Editor, Position, RecordingSurface, Rect};
//!
//! let mut editor = Editor::new(Rect::new(0, 0, 320, 120));
//! editor.focus_changed(true);
//! editor.put("Hello, world");
//! editor.select(Position::new(0, 7), Position::new(0, 12));
//! editor.put("editor");
//! assert_eq!(editor.text(), "Hello, editor");
//!
//! editor.undo();
//! assert_eq!(editor.text(), "Hello, world");
//!
//! let mut surface = RecordingSurface::new();
//! editor.render(&mut surface);
//! assert!(surface.texts().any(|t| t == "Hello, world"));
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow EditorEvent, EditorState etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod caret;
pub mod clipboard;
pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod highlight;
pub mod input;
pub mod layout;
pub mod render;
pub mod text;
pub mod unicode;
pub mod viewport;

// Re-export core types at crate root
pub use color::Rgba;
pub use editor::{Editor, EditorState, IndentFn};
pub use error::{Error, Result};
pub use event::{
    EditorEvent, LogLevel, clear_log_callback, emit_log, set_log_callback, set_log_level,
};
pub use geometry::{Point, Rect, Size};

// Re-export configuration
pub use config::{CharFilter, EditorOptions, EditorScheme, FocusBehavior, TextAlign};

// Re-export text model
pub use text::{
    CaretRestore, EditBuffer, EditCommand, History, MergePolicy, Position, Selection,
    SelectionMode, TextBuffer, TextRange,
};

// Re-export input types
pub use caret::CaretMotion;
pub use input::{
    CharEvent, Event, KeyCode, KeyEvent, KeyModifiers, PointerButton, PointerEvent,
    PointerEventKind,
};

// Re-export host interfaces
pub use clipboard::{Clipboard, MemoryClipboard};
pub use layout::{Font, Measurer, MonospaceMeasurer, WrapMode};
pub use render::{DrawCommand, RecordingSurface, Surface};
pub use unicode::Direction;
pub use viewport::{Axis, Viewport};
