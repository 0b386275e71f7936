//! Line layout: wrapping, BiDi reordering, caching and hit-testing.
//!
//! Key types:
//!
//! - [`Measurer`]: injected font metrics; [`MonospaceMeasurer`] for cells
//! - [`layout_line`]: pure layout of one line into [`VisualLine`]s
//! - [`LayoutEngine`]: per-stamp cache and row mapping for a buffer
//! - [`TextGeometry`]: logical position ↔ surface point mapping
//!
//! # Examples
//!
//! ```
//! use textedit::layout::{LayoutEngine, WrapMode};
//! use textedit::TextBuffer;
//!
//! let buffer = TextBuffer::with_text("hello world");
//! let mut engine = LayoutEngine::default();
//! engine.set_wrap_mode(WrapMode::Word);
//! engine.set_wrap_width(48);
//! assert_eq!(engine.total_rows(&buffer), 2);
//! ```

mod coords;
mod engine;
mod line;
mod measure;

pub use coords::TextGeometry;
pub use engine::LayoutEngine;
pub use line::{LayoutParams, LayoutStrategy, LineLayout, VisualLine, WrapMode, layout_line};
pub use measure::{Font, Measurer, MonospaceMeasurer};
