//! Shared helpers for the integration tests.
//!
//! Editors built here use the default monospace measurer (8x16 px cells)
//! and bounds of 206x70, which leaves a 200x64 text area at (3, 3): four
//! visible rows of up to 25 cells.

#![allow(dead_code)]

use std::sync::Once;

use textedit::{Editor, Event, LogLevel, Point, Rect, set_log_callback};
use tracing::Level;

pub const CELL: i32 = 8;
pub const ROW: i32 = 16;
pub const ORIGIN: i32 = 3;

/// Route engine diagnostics into `tracing` once per test binary.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .try_init();
        set_log_callback(|level, message| match level {
            LogLevel::Debug => tracing::debug!(target: "textedit", "{message}"),
            LogLevel::Info => tracing::info!(target: "textedit", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "textedit", "{message}"),
            LogLevel::Error => tracing::error!(target: "textedit", "{message}"),
        });
    });
}

/// Focused editor holding `text`, with its event queue drained.
pub fn editor(text: &str) -> Editor {
    init_logging();
    let mut editor = Editor::new(Rect::new(0, 0, 206, 70));
    editor.set_text(text);
    editor.focus_changed(true);
    editor.take_events();
    editor
}

/// A point inside cell `col` of visible row `row`.
pub fn cell(col: i32, row: i32) -> Point {
    Point::new(ORIGIN + col * CELL, ORIGIN + row * ROW + ROW / 2)
}

/// Feed `text` through the event path one character at a time.
pub fn type_text(editor: &mut Editor, text: &str) {
    for ch in text.chars() {
        editor.handle_event(&Event::from(ch));
    }
}
