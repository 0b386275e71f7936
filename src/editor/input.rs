//! Input dispatch for the editor.

use super::{DragState, Editor, EditorState, WHEEL_ROWS};
use crate::caret::CaretMotion;
use crate::config::FocusBehavior;
use crate::event::{EditorEvent, LogLevel, log_at};
use crate::geometry::Point;
use crate::input::{
    CharEvent, Event, KeyCode, KeyEvent, KeyModifiers, PointerButton, PointerEvent,
    PointerEventKind,
};
use crate::text::SelectionMode;
use crate::viewport::Axis;

impl Editor {
    /// Route an input event. Returns `true` if the editor consumed it.
    ///
    /// Keyboard input is ignored while unfocused.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Focus(focused) => {
                self.focus_changed(*focused);
                true
            }
            Event::Char(ch) => self.focused && self.respond_char(ch),
            Event::Key(key) => self.focused && self.respond_key(key),
            Event::Pointer(pointer) => self.respond_pointer(pointer),
        }
    }

    /// Typed text. Characters typed with Ctrl or Alt are left to shortcuts.
    pub fn respond_char(&mut self, event: &CharEvent) -> bool {
        if event
            .modifiers
            .intersects(KeyModifiers::CTRL | KeyModifiers::ALT)
        {
            return false;
        }
        self.put_char(event.ch)
    }

    /// Navigation, deletion and shortcut keys.
    pub fn respond_key(&mut self, key: &KeyEvent) -> bool {
        if key.is_ctrl_letter('a') {
            self.select_all();
            return true;
        }
        if key.is_ctrl_letter('c') {
            return self.copy();
        }
        if key.is_ctrl_letter('x') {
            return self.cut();
        }
        if key.is_ctrl_letter('v') {
            return self.paste();
        }
        if key.is_ctrl_letter('z') {
            return if key.shift() { self.redo() } else { self.undo() };
        }
        if key.is_ctrl_letter('y') {
            return self.redo();
        }

        let ctrl = key.ctrl();
        let motion = match key.code {
            KeyCode::Left if ctrl => CaretMotion::WordLeft,
            KeyCode::Right if ctrl => CaretMotion::WordRight,
            KeyCode::Left => CaretMotion::Left,
            KeyCode::Right => CaretMotion::Right,
            KeyCode::Up => CaretMotion::Up,
            KeyCode::Down => CaretMotion::Down,
            KeyCode::Home if ctrl => CaretMotion::DocumentStart,
            KeyCode::End if ctrl => CaretMotion::DocumentEnd,
            KeyCode::Home => CaretMotion::LineStart,
            KeyCode::End => CaretMotion::LineEnd,
            KeyCode::PageUp => CaretMotion::PageUp,
            KeyCode::PageDown => CaretMotion::PageDown,
            KeyCode::Backspace if ctrl => return self.delete_word_backward(),
            KeyCode::Backspace => return self.backspace(),
            KeyCode::Delete if ctrl => return self.delete_word_forward(),
            KeyCode::Delete => return self.delete(),
            KeyCode::Enter => return self.enter(),
            KeyCode::Tab if !ctrl && !key.alt() => return self.put_char('\t'),
            KeyCode::Esc => {
                let busy = !self.edit.selection().is_empty() || self.drag != DragState::Idle;
                if busy {
                    self.deselect();
                }
                return busy;
            }
            _ => return false,
        };
        self.move_caret(motion, key.shift());
        true
    }

    /// Pointer presses, drags, releases and wheel notches.
    pub fn respond_pointer(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Press if event.button == PointerButton::Primary => {
                self.pointer_pressed(event.position, event.modifiers)
            }
            PointerEventKind::Press => false,
            PointerEventKind::Move => self.pointer_moved(event.position),
            PointerEventKind::Release => self.pointer_released(event.position),
            PointerEventKind::Wheel { dx, dy } => {
                self.bounds.contains(event.position) && self.pointer_wheel(dx, dy)
            }
        }
    }

    /// Primary button pressed at `point`.
    ///
    /// Shift extends the selection. Pressing inside the selection arms a
    /// drag-move; anywhere else places the caret and starts a selection.
    pub fn pointer_pressed(&mut self, point: Point, modifiers: KeyModifiers) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        if !self.focused {
            self.focus_changed(true);
        }
        let pos = self.hit_test(point);
        let selection = *self.edit.selection();

        if modifiers.contains(KeyModifiers::SHIFT) {
            self.edit.set_caret(pos, true);
            self.enter_selecting();
            self.drag = DragState::Selecting;
        } else if self.options.editable
            && !selection.is_empty()
            && selection.range().contains(pos)
        {
            self.edit.set_selection_mode(SelectionMode::DragMove);
            self.drag = DragState::PendingMove { press: pos };
            self.events.push(EditorEvent::RenderRequested);
            return true;
        } else {
            self.edit.set_caret(pos, false);
            self.drag = DragState::Selecting;
        }
        self.caret_moved(true);
        true
    }

    /// Pointer moved to `point`. Only meaningful while a button is down.
    pub fn pointer_moved(&mut self, point: Point) -> bool {
        match self.drag {
            DragState::Idle => false,
            DragState::Selecting => {
                let pos = self.hit_test(point);
                if pos != self.edit.caret() {
                    self.edit.set_caret(pos, true);
                    self.enter_selecting();
                    self.caret_moved(true);
                }
                true
            }
            DragState::PendingMove { .. } | DragState::Moving { .. } => {
                let target = self.hit_test(point);
                self.drag = DragState::Moving { target };
                self.events.push(EditorEvent::RenderRequested);
                true
            }
        }
    }

    /// Primary button released at `point`.
    pub fn pointer_released(&mut self, point: Point) -> bool {
        match std::mem::take(&mut self.drag) {
            DragState::Idle => false,
            DragState::Selecting => {
                self.leave_selecting();
                self.events.push(EditorEvent::RenderRequested);
                true
            }
            DragState::PendingMove { press } => {
                self.edit.set_caret(press, false);
                self.leave_selecting();
                self.caret_moved(true);
                true
            }
            DragState::Moving { .. } => {
                let target = self.hit_test(point);
                if self.options.editable && self.edit.move_selection_to(target) {
                    log_at!(LogLevel::Debug, "editor: moved selection to {target:?}");
                    self.leave_selecting();
                    self.text_changed();
                } else {
                    // Dropped onto the selection itself.
                    self.edit.set_caret(target, false);
                    self.leave_selecting();
                    self.caret_moved(true);
                }
                true
            }
        }
    }

    /// Wheel notches: `dy` rows vertically, `dx` character widths sideways,
    /// both scaled by the wheel step.
    pub fn pointer_wheel(&mut self, dx: i32, dy: i32) -> bool {
        let mut moved = false;
        if dy != 0 {
            moved |= self.scroll(dy.saturating_mul(WHEEL_ROWS), Axis::Vertical);
        }
        if dx != 0 {
            moved |= self.scroll(dx.saturating_mul(self.wheel_step_x()), Axis::Horizontal);
        }
        moved
    }

    /// Focus gained or lost.
    pub fn focus_changed(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        if focused {
            if self.options.editable {
                self.state = EditorState::EditingIdle;
            }
            if self.options.focus_behavior == FocusBehavior::SelectAll {
                self.select_all();
            }
        } else {
            self.abort_drag();
            self.edit.history_mut().seal();
            self.state = EditorState::Viewing;
        }
        self.events.push(EditorEvent::RenderRequested);
    }
}
