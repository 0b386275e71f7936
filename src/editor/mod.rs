//! The editor façade.
//!
//! [`Editor`] ties the buffer, layout, viewport, highlighter and history
//! together behind one object a host can drive with input events and ask
//! to draw itself. Every mutation goes through here, so the façade is the
//! single place that keeps the caret visible, queues [`EditorEvent`]s and
//! enforces the editing options.
//!
//! # Examples
//!
//! ```
//! use textedit::{Editor, EditorEvent, Rect};
//!
//! let mut editor = Editor::new(Rect::new(0, 0, 200, 60));
//! editor.focus_changed(true);
//! editor.put("hello");
//! editor.backspace();
//! assert_eq!(editor.text(), "hell");
//!
//! let events = editor.take_events();
//! assert!(events.contains(&EditorEvent::FirstChange));
//! assert!(events.contains(&EditorEvent::TextChanged));
//! ```

mod input;
mod render;

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::caret::{self, CaretMotion};
use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::{CharFilter, EditorOptions, EditorScheme, FocusBehavior, TextAlign};
use crate::error::{Error, Result};
use crate::event::{EditorEvent, EventQueue, LogLevel, log_at};
use crate::geometry::{Point, Rect};
use crate::highlight::KeywordHighlighter;
use crate::layout::{Font, LayoutEngine, Measurer, TextGeometry, WrapMode};
use crate::text::{
    EditBuffer, History, MergePolicy, Position, SelectionMode, normalize_newlines,
};
use crate::unicode::Direction;
use crate::viewport::{Axis, ContentExtent, Viewport};

/// Border thickness in pixels.
const BORDER: u32 = 1;
/// Gap between the border and the text.
const PADDING: u32 = 2;
/// Rows scrolled per wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Produces the indentation for a new line from the text of the line the
/// caret is on.
pub type IndentFn = Box<dyn Fn(&str) -> String>;

/// Interaction state of the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditorState {
    /// Unfocused or read-only.
    #[default]
    Viewing,
    /// Focused and editable, no selection gesture in progress.
    EditingIdle,
    /// A pointer drag or shift-extension is growing the selection.
    Selecting,
}

/// Pointer gesture in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum DragState {
    #[default]
    Idle,
    /// Dragging out a selection.
    Selecting,
    /// Pressed inside the selection; not moved yet.
    PendingMove { press: Position },
    /// Dragging the selection towards `target`.
    Moving { target: Position },
}

/// Leading whitespace of `line`.
fn leading_whitespace(line: &str) -> String {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

/// Embeddable text editor.
pub struct Editor {
    edit: EditBuffer,
    layout: LayoutEngine,
    viewport: Viewport,
    highlighter: KeywordHighlighter,
    options: EditorOptions,
    scheme: EditorScheme,
    bounds: Rect,
    clipboard: Box<dyn Clipboard>,
    events: EventQueue,
    state: EditorState,
    focused: bool,
    placeholder: Option<String>,
    mask: Option<char>,
    indent: Option<IndentFn>,
    drag: DragState,
    changed_once: bool,
    /// Last selection reported through `SelectionChanged`.
    reported: (Position, Position),
    caret_width: u32,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("edit", &self.edit)
            .field("layout", &self.layout)
            .field("viewport", &self.viewport)
            .field("options", &self.options)
            .field("bounds", &self.bounds)
            .field("state", &self.state)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Create an empty editor occupying `bounds`, with default options.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self::with_options(bounds, EditorOptions::default())
    }

    /// Create an empty editor with `options`.
    #[must_use]
    pub fn with_options(bounds: Rect, options: EditorOptions) -> Self {
        let mut history = History::new(options.undo_max_depth, options.merge_policy);
        history.set_enabled(options.undo_enabled);
        let mut layout = LayoutEngine::default();
        layout.set_wrap_mode(options.wrap);
        layout.set_tab_width(options.tab_width);
        layout.set_direction(options.direction);

        let mut editor = Self {
            edit: EditBuffer::new().with_history(history),
            layout,
            viewport: Viewport::default(),
            highlighter: KeywordHighlighter::new(),
            options,
            scheme: EditorScheme::default(),
            bounds,
            clipboard: Box::new(MemoryClipboard::new()),
            events: EventQueue::new(),
            state: EditorState::Viewing,
            focused: false,
            placeholder: None,
            mask: None,
            indent: Some(Box::new(leading_whitespace)),
            drag: DragState::Idle,
            changed_once: false,
            reported: (Position::origin(), Position::origin()),
            caret_width: 1,
        };
        editor.sync_area();
        editor
    }

    #[must_use]
    pub fn state(&self) -> EditorState {
        self.state
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    #[must_use]
    pub fn scheme(&self) -> &EditorScheme {
        &self.scheme
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Area inside the border and padding where text is drawn.
    #[must_use]
    pub fn text_area(&self) -> Rect {
        self.bounds.inset(BORDER + PADDING)
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    /// Buffer, selection and history.
    #[must_use]
    pub fn edit_buffer(&self) -> &EditBuffer {
        &self.edit
    }

    #[must_use]
    pub fn highlighter(&self) -> &KeywordHighlighter {
        &self.highlighter
    }

    /// Keyword rules and styles. Changes show on the next render.
    pub fn highlighter_mut(&mut self) -> &mut KeywordHighlighter {
        self.events.push(EditorEvent::RenderRequested);
        &mut self.highlighter
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    #[must_use]
    pub fn mask(&self) -> Option<char> {
        self.mask
    }

    /// Whole document text.
    #[must_use]
    pub fn text(&self) -> String {
        self.edit.text()
    }

    /// Text of line `line` (clamped), without its line break.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Cow<'_, str> {
        self.edit.buffer().line_text(line)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.edit.buffer().line_count()
    }

    #[must_use]
    pub fn caret(&self) -> Position {
        self.edit.caret()
    }

    /// Anchor and active end of the selection.
    #[must_use]
    pub fn selection_points(&self) -> (Position, Position) {
        let selection = self.edit.selection();
        (selection.anchor, selection.active)
    }

    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        self.edit.selection().mode
    }

    #[must_use]
    pub fn selected_text(&self) -> String {
        self.edit.selected_text()
    }

    /// Top of the caret in surface coordinates.
    #[must_use]
    pub fn caret_screen_pos(&self) -> Point {
        self.geometry().to_screen(self.edit.caret())
    }

    /// Surface point to document position.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Position {
        self.geometry().hit_test(point)
    }

    /// Drop target of a selection drag, if one is in progress.
    #[must_use]
    pub fn drag_target(&self) -> Option<Position> {
        match self.drag {
            DragState::Moving { target } => Some(target),
            _ => None,
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.edit.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.edit.can_redo()
    }

    /// Remove and return the queued notifications.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain()
    }

    /// Move or resize the editor.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.sync_area();
            self.reveal_caret();
            self.events.push(EditorEvent::RenderRequested);
        }
    }

    pub fn set_scheme(&mut self, scheme: EditorScheme) {
        self.scheme = scheme;
        self.events.push(EditorEvent::RenderRequested);
    }

    pub fn set_font(&mut self, font: Font) {
        self.layout.set_font(font);
        self.layout_changed();
    }

    /// Replace the text measurer.
    pub fn set_measurer(&mut self, measurer: Box<dyn Measurer>) {
        self.layout.set_measurer(measurer);
        self.layout_changed();
    }

    pub fn set_wrap(&mut self, wrap: WrapMode) {
        self.options.wrap = wrap;
        self.layout.set_wrap_mode(wrap);
        self.layout_changed();
    }

    /// Allow or forbid line breaks. Existing text is left alone.
    pub fn set_multi_line(&mut self, multi_line: bool) {
        self.options.multi_line = multi_line;
    }

    /// Enable or disable editing. Disabling drops back to `Viewing`.
    pub fn set_editable(&mut self, editable: bool) {
        if self.options.editable == editable {
            return;
        }
        self.options.editable = editable;
        self.history_seal();
        if !editable {
            self.abort_drag();
            self.state = EditorState::Viewing;
        } else if self.focused {
            self.state = EditorState::EditingIdle;
        }
        self.events.push(EditorEvent::RenderRequested);
    }

    pub fn set_caret_visible_when_read_only(&mut self, visible: bool) {
        self.options.caret_visible_when_read_only = visible;
        self.events.push(EditorEvent::RenderRequested);
    }

    pub fn set_tab_width(&mut self, tab_width: usize) {
        self.options.tab_width = tab_width.max(1);
        self.layout.set_tab_width(tab_width);
        self.layout_changed();
    }

    /// Bound the undo history. `0` disables undo and clears it.
    pub fn set_undo_max_depth(&mut self, depth: usize) {
        self.options.undo_max_depth = depth;
        self.edit.history_mut().set_max_depth(depth);
    }

    /// Turn undo recording on or off without touching the depth limit.
    /// Turning it off clears the history.
    pub fn set_undo_enabled(&mut self, enabled: bool) {
        self.options.undo_enabled = enabled;
        self.edit.history_mut().set_enabled(enabled);
    }

    pub fn set_merge_policy(&mut self, policy: MergePolicy) {
        self.options.merge_policy = policy;
        self.edit.history_mut().set_policy(policy);
    }

    /// Restrict which characters typing and pasting may insert.
    pub fn set_accept(&mut self, accept: CharFilter) {
        self.options.accept = accept;
    }

    pub fn set_alignment(&mut self, alignment: TextAlign) {
        self.options.alignment = alignment;
        self.layout_changed();
    }

    /// Paragraph base direction. `Direction::Neutral` detects it per line.
    pub fn set_direction(&mut self, direction: Direction) {
        self.options.direction = direction;
        self.layout.set_direction(direction);
        self.layout_changed();
    }

    pub fn set_focus_behavior(&mut self, behavior: FocusBehavior) {
        self.options.focus_behavior = behavior;
    }

    /// Where [`select_all`](Self::select_all) leaves the caret: at the end
    /// of the document with `move_to_end`, otherwise at its start.
    pub fn set_select_behavior(&mut self, move_to_end: bool) {
        self.options.select_moves_to_end = move_to_end;
    }

    /// Display every character as `mask`, as in a password field.
    pub fn set_mask(&mut self, mask: Option<char>) {
        self.mask = mask;
        self.layout.set_mask(mask);
        self.layout_changed();
    }

    /// Text drawn while the document is empty and unfocused.
    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.placeholder = placeholder;
        self.events.push(EditorEvent::RenderRequested);
    }

    /// Set the indentation generator used by [`enter`](Self::enter).
    /// `None` turns auto-indent off.
    pub fn set_auto_indent(&mut self, indent: Option<IndentFn>) {
        self.indent = indent;
    }

    pub fn set_clipboard(&mut self, clipboard: Box<dyn Clipboard>) {
        self.clipboard = clipboard;
    }

    /// Replace the document. Clears history and resets scrolling.
    pub fn set_text(&mut self, text: &str) {
        self.replace_text(text, false);
    }

    /// Like [`set_text`](Self::set_text), but with `end_caret` the caret
    /// lands at the end of the new text.
    pub fn set_text_with_caret(&mut self, text: &str, end_caret: bool) {
        self.replace_text(text, end_caret);
    }

    fn replace_text(&mut self, text: &str, end_caret: bool) {
        self.abort_drag();
        self.edit.set_text(text);
        if end_caret {
            let end = self.edit.buffer().end_position();
            self.edit.set_caret(end, false);
        }
        self.changed_once = false;
        self.viewport.reset();
        if self.state == EditorState::Selecting {
            self.state = EditorState::EditingIdle;
        }
        self.events.push(EditorEvent::TextChanged);
        self.push_scrolled();
        self.caret_moved(true);
    }

    /// Replace the document with the contents of `path`.
    ///
    /// On failure the document is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| {
            log_at!(LogLevel::Warn, "load: cannot read {}: {err}", path.display());
            Error::from(err)
        })?;
        let text = String::from_utf8(bytes).map_err(|_| {
            log_at!(LogLevel::Warn, "load: {} is not valid UTF-8", path.display());
            Error::InvalidUtf8 {
                path: path.to_path_buf(),
            }
        })?;
        self.set_text(&text);
        log_at!(
            LogLevel::Info,
            "load: {} ({} lines)",
            path.display(),
            self.line_count()
        );
        Ok(())
    }

    /// Insert `text` at the caret, replacing the selection.
    ///
    /// Rejected when read-only or when the character filter refuses any
    /// character. In single-line mode only the first line is kept.
    pub fn put(&mut self, text: &str) -> bool {
        if !self.options.editable {
            return false;
        }
        let text = normalize_newlines(text);
        let text = if self.options.multi_line {
            &*text
        } else {
            text.split('\n').next().unwrap_or_default()
        };
        if !self.accepts(text) {
            return false;
        }
        self.apply_edit(|edit| edit.insert_text(text))
    }

    /// Type one character. Line breaks go through [`enter`](Self::enter);
    /// other control characters except tab are ignored.
    pub fn put_char(&mut self, ch: char) -> bool {
        match ch {
            '\n' | '\r' => self.enter(),
            '\t' => self.put("\t"),
            c if c.is_control() => false,
            c => {
                let mut buf = [0u8; 4];
                self.put(c.encode_utf8(&mut buf))
            }
        }
    }

    /// Break the line at the caret, indenting the new line.
    pub fn enter(&mut self) -> bool {
        if !self.options.editable || !self.options.multi_line {
            return false;
        }
        let indent = match &self.indent {
            Some(indent) => indent(&self.edit.buffer().line_text(self.edit.caret().line)),
            None => String::new(),
        };
        let text = format!("\n{indent}");
        self.apply_edit(|edit| {
            edit.history_mut().seal();
            let changed = edit.insert_text(&text);
            edit.history_mut().seal();
            changed
        })
    }

    pub fn backspace(&mut self) -> bool {
        self.editable_edit(EditBuffer::backspace)
    }

    /// Delete forward.
    pub fn delete(&mut self) -> bool {
        self.editable_edit(EditBuffer::delete_forward)
    }

    pub fn delete_word_backward(&mut self) -> bool {
        self.editable_edit(EditBuffer::delete_word_backward)
    }

    pub fn delete_word_forward(&mut self) -> bool {
        self.editable_edit(EditBuffer::delete_word_forward)
    }

    pub fn undo(&mut self) -> bool {
        self.editable_edit(EditBuffer::undo)
    }

    pub fn redo(&mut self) -> bool {
        self.editable_edit(EditBuffer::redo)
    }

    /// Copy the selection to the clipboard. Works read-only; a mask
    /// replaces each copied character.
    pub fn copy(&mut self) -> bool {
        if self.edit.selection().is_empty() {
            return false;
        }
        let text = self.edit.selected_text();
        let text = match self.mask {
            Some(mask) => text
                .chars()
                .map(|c| if c == '\n' { c } else { mask })
                .collect(),
            None => text,
        };
        self.clipboard.set_text(&text);
        true
    }

    pub fn cut(&mut self) -> bool {
        if !self.options.editable || !self.copy() {
            return false;
        }
        self.apply_edit(EditBuffer::delete_selection)
    }

    /// Insert the clipboard text, filtered like typed text.
    pub fn paste(&mut self) -> bool {
        if !self.options.editable {
            return false;
        }
        match self.clipboard.get_text() {
            Some(text) => {
                self.history_seal();
                let changed = self.put(&text);
                self.history_seal();
                changed
            }
            None => false,
        }
    }

    /// Move the caret to `pos` (clamped), collapsing the selection.
    pub fn set_caret(&mut self, pos: Position) {
        self.abort_drag();
        self.edit.set_caret(pos, false);
        self.leave_selecting();
        self.caret_moved(true);
    }

    /// Move the caret by `motion`. With `extend` the selection grows.
    pub fn move_caret(&mut self, motion: CaretMotion, extend: bool) {
        self.abort_drag();
        let target = caret::target_position(
            &self.edit,
            &self.geometry(),
            motion,
            extend,
            self.viewport.anchor_x,
        );
        self.edit.set_caret(target, extend);
        if extend {
            self.enter_selecting();
        } else {
            self.leave_selecting();
        }
        self.caret_moved(!motion.is_vertical());
    }

    /// Select from `anchor` to `active`.
    pub fn select(&mut self, anchor: Position, active: Position) {
        self.abort_drag();
        self.edit.select(anchor, active, SelectionMode::Programmatic);
        self.caret_moved(true);
    }

    /// Select the whole document. The caret end follows
    /// [`set_select_behavior`](Self::set_select_behavior).
    pub fn select_all(&mut self) {
        self.abort_drag();
        let end = self.edit.buffer().end_position();
        let (anchor, active) = if self.options.select_moves_to_end {
            (Position::origin(), end)
        } else {
            (end, Position::origin())
        };
        self.edit.select(anchor, active, SelectionMode::Programmatic);
        self.caret_moved(true);
    }

    /// Drop the selection. A drag in progress is abandoned without
    /// touching the text.
    pub fn deselect(&mut self) {
        self.abort_drag();
        self.edit.deselect();
        self.leave_selecting();
        self.caret_moved(true);
    }

    /// Scroll by `delta` rows (vertical) or pixels (horizontal).
    pub fn scroll(&mut self, delta: i32, axis: Axis) -> bool {
        let content = self.content_extent();
        if self.viewport.scroll(delta, axis, &content) {
            self.push_scrolled();
            self.events.push(EditorEvent::RenderRequested);
            true
        } else {
            false
        }
    }

    /// Scroll so the caret is visible. Returns `true` if the view moved.
    pub fn ensure_caret_visible(&mut self) -> bool {
        self.reveal_caret()
    }

    fn geometry(&self) -> TextGeometry<'_> {
        TextGeometry::new(
            self.edit.buffer(),
            &self.layout,
            &self.viewport,
            self.text_area(),
            self.options.alignment,
        )
    }

    /// Scrollable extent. Horizontally this is the widest line on screen
    /// or under the caret, so only those lines are laid out.
    fn content_extent(&self) -> ContentExtent {
        let buffer = self.edit.buffer();
        let wrapped = self.layout.is_wrapped();
        let width = if wrapped {
            0
        } else {
            let first = self.viewport.v_offset;
            let on_screen = first..first.saturating_add(self.viewport.drawn_rows());
            let caret_line = self.edit.caret().line;
            self.layout
                .lines_width(buffer, on_screen)
                .max(self.layout.lines_width(buffer, caret_line..caret_line + 1))
                + self.caret_width
        };
        ContentExtent {
            rows: self.layout.total_rows(buffer),
            width,
            wrapped,
        }
    }

    /// Push the text-area size and row height into layout and viewport.
    fn sync_area(&mut self) {
        let area = self.text_area();
        self.viewport.area = area.size();
        self.viewport.line_height = self.layout.line_height();
        self.layout
            .set_wrap_width(area.width.saturating_sub(self.caret_width).max(1));
        let content = self.content_extent();
        if self.viewport.clamp(&content) {
            self.push_scrolled();
        }
    }

    fn layout_changed(&mut self) {
        self.sync_area();
        self.reveal_caret();
        let (_, x) = self.geometry().content_x(self.edit.caret());
        self.viewport.anchor_x = x;
        self.events.push(EditorEvent::RenderRequested);
    }

    fn push_scrolled(&mut self) {
        self.events.push(EditorEvent::Scrolled {
            h_offset: self.viewport.h_offset,
            v_offset: self.viewport.v_offset,
        });
    }

    fn reveal_caret(&mut self) -> bool {
        let before = (self.viewport.h_offset, self.viewport.v_offset);
        let (row, x) = self.geometry().content_x(self.edit.caret());
        let content = self.content_extent();
        self.viewport.ensure_visible(x, row, self.caret_width, &content);
        if self.viewport.v_offset != before.1 {
            // Different lines on screen, so a different horizontal extent.
            let content = self.content_extent();
            self.viewport.clamp(&content);
        }
        let moved = (self.viewport.h_offset, self.viewport.v_offset) != before;
        if moved {
            self.push_scrolled();
        }
        moved
    }

    /// Report a caret or selection change and keep the caret on screen.
    fn caret_moved(&mut self, update_anchor_x: bool) {
        let points = self.selection_points();
        if points != self.reported {
            self.reported = points;
            self.events.push(EditorEvent::SelectionChanged {
                anchor: points.0,
                active: points.1,
            });
        }
        self.reveal_caret();
        if update_anchor_x {
            let (_, x) = self.geometry().content_x(self.edit.caret());
            self.viewport.anchor_x = x;
        }
        self.events.push(EditorEvent::RenderRequested);
    }

    fn text_changed(&mut self) {
        if !self.changed_once {
            self.changed_once = true;
            self.events.push(EditorEvent::FirstChange);
        }
        self.events.push(EditorEvent::TextChanged);
        let content = self.content_extent();
        if self.viewport.clamp(&content) {
            self.push_scrolled();
        }
        self.caret_moved(true);
    }

    fn apply_edit(&mut self, op: impl FnOnce(&mut EditBuffer) -> bool) -> bool {
        self.abort_drag();
        let changed = op(&mut self.edit);
        if changed {
            self.leave_selecting();
            self.text_changed();
        }
        changed
    }

    fn editable_edit(&mut self, op: fn(&mut EditBuffer) -> bool) -> bool {
        self.options.editable && self.apply_edit(op)
    }

    fn history_seal(&mut self) {
        self.edit.history_mut().seal();
    }

    /// Check `text` against the character filter as if typed at the caret.
    fn accepts(&self, text: &str) -> bool {
        let filter = self.options.accept;
        if matches!(filter, CharFilter::Unrestricted) {
            return true;
        }
        let buffer = self.edit.buffer();
        let range = self.edit.selection().range();
        let mut head: String = buffer
            .line_text(range.start.line)
            .chars()
            .take(range.start.column)
            .collect();
        let tail: String = buffer
            .line_text(range.end.line)
            .chars()
            .skip(range.end.column)
            .collect();
        let mut line_index = range.start.line;
        let mut column = range.start.column;

        for ch in text.chars() {
            if ch == '\n' {
                head.clear();
                line_index += 1;
                column = 0;
                continue;
            }
            let line = format!("{head}{tail}");
            if !filter.accepts(ch, &line, line_index, column) {
                return false;
            }
            head.push(ch);
            column += 1;
        }
        true
    }

    fn enter_selecting(&mut self) {
        if self.state == EditorState::EditingIdle {
            self.state = EditorState::Selecting;
        }
    }

    fn leave_selecting(&mut self) {
        if self.state == EditorState::Selecting {
            self.state = EditorState::EditingIdle;
        }
    }

    fn abort_drag(&mut self) {
        if matches!(
            self.drag,
            DragState::PendingMove { .. } | DragState::Moving { .. }
        ) {
            self.edit.set_selection_mode(SelectionMode::Pointer);
        }
        self.drag = DragState::Idle;
    }

    fn wheel_step_x(&self) -> i32 {
        i32::try_from(self.layout.average_char_width())
            .unwrap_or(i32::MAX)
            .saturating_mul(WHEEL_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Event, KeyCode, KeyEvent};

    fn editor(text: &str) -> Editor {
        let mut editor = Editor::new(Rect::new(0, 0, 206, 70));
        editor.set_text(text);
        editor.focus_changed(true);
        editor.take_events();
        editor
    }

    #[test]
    fn test_text_area_insets_border_and_padding() {
        let editor = Editor::new(Rect::new(10, 20, 100, 50));
        assert_eq!(editor.text_area(), Rect::new(13, 23, 94, 44));
    }

    #[test]
    fn test_focus_enters_editing() {
        let mut editor = Editor::new(Rect::new(0, 0, 100, 40));
        assert_eq!(editor.state(), EditorState::Viewing);
        editor.focus_changed(true);
        assert_eq!(editor.state(), EditorState::EditingIdle);
        editor.focus_changed(false);
        assert_eq!(editor.state(), EditorState::Viewing);
    }

    #[test]
    fn test_read_only_rejects_edits_but_copies() {
        let mut editor = editor("secret");
        editor.set_editable(false);
        assert_eq!(editor.state(), EditorState::Viewing);
        assert!(!editor.put("x"));
        assert!(!editor.backspace());
        editor.select_all();
        assert!(editor.copy());
        assert!(!editor.cut());
        assert_eq!(editor.text(), "secret");
    }

    #[test]
    fn test_first_change_reported_once() {
        let mut editor = editor("");
        editor.put("a");
        editor.put("b");
        let events = editor.take_events();
        let first = events
            .iter()
            .filter(|e| **e == EditorEvent::FirstChange)
            .count();
        assert_eq!(first, 1);
        editor.put("c");
        assert!(!editor.take_events().contains(&EditorEvent::FirstChange));
        editor.set_text("new");
        editor.put("x");
        assert!(editor.take_events().contains(&EditorEvent::FirstChange));
    }

    #[test]
    fn test_single_line_keeps_first_line() {
        let mut editor =
            Editor::with_options(Rect::new(0, 0, 200, 30), EditorOptions::single_line());
        editor.focus_changed(true);
        assert!(editor.put("one\ntwo"));
        assert_eq!(editor.text(), "one");
        assert!(!editor.enter());
        assert!(!editor.put_char('\n'));
    }

    #[test]
    fn test_integer_filter() {
        let mut editor = editor("");
        editor.set_accept(CharFilter::Integer);
        assert!(editor.put_char('-'));
        assert!(editor.put_char('4'));
        assert!(!editor.put_char('x'));
        assert!(!editor.put_char('-'));
        assert!(!editor.put("1a"));
        assert_eq!(editor.text(), "-4");
    }

    #[test]
    fn test_enter_copies_indent() {
        let mut editor = editor("    let x;");
        editor.move_caret(CaretMotion::LineEnd, false);
        assert!(editor.enter());
        assert_eq!(editor.text(), "    let x;\n    ");
        assert_eq!(editor.caret(), Position::new(1, 4));

        editor.set_auto_indent(None);
        editor.enter();
        assert_eq!(editor.caret(), Position::new(2, 0));
    }

    #[test]
    fn test_control_chars_ignored() {
        let mut editor = editor("");
        assert!(!editor.put_char('\u{7}'));
        assert!(editor.put_char('\t'));
        assert_eq!(editor.text(), "\t");
    }

    #[test]
    fn test_mask_applies_to_copy() {
        let mut editor = editor("hunter2");
        editor.set_mask(Some('*'));
        editor.select_all();
        assert!(editor.copy());
        editor.move_caret(CaretMotion::DocumentEnd, false);
        editor.paste();
        assert_eq!(editor.text(), "hunter2*******");
    }

    #[test]
    fn test_shift_motion_enters_selecting() {
        let mut editor = editor("hello");
        editor.move_caret(CaretMotion::Right, true);
        assert_eq!(editor.state(), EditorState::Selecting);
        assert_eq!(editor.selected_text(), "h");
        editor.move_caret(CaretMotion::Right, false);
        assert_eq!(editor.state(), EditorState::EditingIdle);
        assert_eq!(editor.caret(), Position::new(0, 1));
    }

    #[test]
    fn test_handle_event_dispatches_keys() {
        let mut editor = editor("ab");
        editor.move_caret(CaretMotion::LineEnd, false);
        assert!(editor.handle_event(&Event::Key(KeyEvent::key(KeyCode::Backspace))));
        assert_eq!(editor.text(), "a");
    }

    #[test]
    fn test_load_missing_file_keeps_text() {
        let mut editor = editor("keep");
        let err = editor.load("/definitely/not/here.txt");
        assert!(matches!(err, Err(Error::Io(_))));
        assert_eq!(editor.text(), "keep");
    }

    #[test]
    fn test_scroll_reports_offsets() {
        let text = (0..20).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut editor = editor(&text);
        assert!(editor.scroll(3, Axis::Vertical));
        assert!(
            editor
                .take_events()
                .contains(&EditorEvent::Scrolled { h_offset: 0, v_offset: 3 })
        );
        assert!(editor.scroll(-10, Axis::Vertical));
        assert_eq!(editor.viewport().v_offset, 0);
        assert!(!editor.scroll(-1, Axis::Vertical));
    }

    #[test]
    fn test_unwrapped_editing_lays_out_only_lines_on_screen() {
        let text = (0..2000)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut editor = editor(&text);
        let on_screen = editor.viewport().drawn_rows();
        // Plus the empty line the editor started with.
        assert!(editor.layout().cached_lines() <= on_screen + 1);

        editor.put("x");
        editor.move_caret(CaretMotion::DocumentEnd, false);
        editor.move_caret(CaretMotion::Up, false);
        assert_eq!(editor.viewport().v_offset, 1996);
        assert!(editor.layout().cached_lines() < 4 * on_screen);
    }

    #[test]
    fn test_horizontal_extent_follows_lines_on_screen() {
        let mut text = vec!["short".to_string(); 10];
        text[0] = "w".repeat(60);
        let mut editor = editor(&text.join("\n"));
        editor.move_caret(CaretMotion::LineEnd, false);
        assert!(editor.viewport().h_offset > 0);

        // Leaving the wide line behind pulls the view back to the short ones.
        editor.set_caret(Position::new(9, 5));
        assert_eq!(editor.viewport().v_offset, 6);
        assert_eq!(editor.viewport().h_offset, 0);
        assert!(!editor.ensure_caret_visible());
    }

    #[test]
    fn test_set_text_with_end_caret() {
        let text = (0..10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut editor = editor("old");
        editor.set_text_with_caret(&text, true);
        assert_eq!(editor.caret(), Position::new(9, 1));
        assert_eq!(editor.viewport().v_offset, 6);
        assert!(!editor.can_undo());

        editor.set_text_with_caret("abc", false);
        assert_eq!(editor.caret(), Position::origin());
        assert_eq!(editor.viewport().v_offset, 0);
    }

    #[test]
    fn test_select_behavior_picks_caret_end() {
        let mut editor = editor("ab\ncd");
        editor.select_all();
        assert_eq!(editor.caret(), Position::new(1, 2));

        editor.set_select_behavior(false);
        editor.select_all();
        assert_eq!(editor.caret(), Position::origin());
        assert_eq!(editor.selected_text(), "ab\ncd");
    }

    #[test]
    fn test_undo_can_be_switched_off_and_on() {
        let mut editor = editor("");
        editor.set_undo_max_depth(5);
        editor.put("a");
        editor.set_undo_enabled(false);
        assert!(!editor.can_undo());
        editor.put("b");
        assert!(!editor.undo());
        assert_eq!(editor.text(), "ab");

        editor.set_undo_enabled(true);
        assert_eq!(editor.options().undo_max_depth, 5);
        editor.put("c");
        assert!(editor.undo());
        assert_eq!(editor.text(), "ab");
    }
}
