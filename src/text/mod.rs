//! Text storage, selection and editing history.
//!
//! Key types:
//!
//! - [`TextBuffer`]: rope-backed lines with per-line change stamps
//! - [`EditBuffer`]: buffer plus selection and undo/redo
//! - [`History`]: bounded undo stack with configurable merging
//! - [`Selection`]: anchor/active caret pair
//!
//! # Examples
//!
//! ```
//! use textedit::EditBuffer;
//!
//! let mut editor = EditBuffer::new();
//! editor.insert_text("Hello");
//! editor.history_mut().seal();
//! editor.insert_text(" World");
//! assert_eq!(editor.text(), "Hello World");
//!
//! editor.undo();
//! assert_eq!(editor.text(), "Hello");
//!
//! editor.redo();
//! assert_eq!(editor.text(), "Hello World");
//! ```

mod buffer;
mod edit;
mod history;
mod selection;

pub use buffer::{Position, TextBuffer, TextRange, normalize_newlines};
pub use edit::EditBuffer;
pub use history::{
    CaretRestore, DEFAULT_MAX_HISTORY_DEPTH, EditCommand, History, MergePolicy,
};
pub use selection::{Selection, SelectionMode};
