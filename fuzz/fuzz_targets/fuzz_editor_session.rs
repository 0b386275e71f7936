//! Fuzz target for whole editing sessions.
//!
//! Drives an `Editor` with arbitrary typing, key, pointer and configuration
//! events. Nothing may panic, the caret must stay inside the document, and
//! undoing everything must restore the starting text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textedit::{
    Axis, Direction, Editor, Event, KeyCode, KeyEvent, KeyModifiers, PointerEvent,
    RecordingSurface, Rect, TextAlign, WrapMode,
};

#[derive(Arbitrary, Debug)]
struct Session {
    start: String,
    width: u8,
    height: u8,
    actions: Vec<Action>,
}

#[derive(Arbitrary, Debug)]
enum Action {
    Type(char),
    Put(String),
    Key { code: u8, shift: bool, ctrl: bool },
    Press { x: i16, y: i16, shift: bool },
    Drag { x: i16, y: i16 },
    Release { x: i16, y: i16 },
    Wheel { dx: i8, dy: i8 },
    Scroll { delta: i16, vertical: bool },
    Wrap(u8),
    Align(u8),
    Direction(u8),
    Mask(Option<char>),
    Editable(bool),
    Focus(bool),
    Resize { width: u8, height: u8 },
    Undo,
    Redo,
    Render,
}

const KEYS: [KeyCode; 14] = [
    KeyCode::Backspace,
    KeyCode::Enter,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Home,
    KeyCode::End,
    KeyCode::PageUp,
    KeyCode::PageDown,
    KeyCode::Tab,
    KeyCode::Delete,
    KeyCode::Esc,
    KeyCode::Char('z'),
];

fn apply(editor: &mut Editor, action: &Action) {
    match action {
        Action::Type(ch) => {
            editor.handle_event(&Event::from(*ch));
        }
        Action::Put(text) => {
            editor.put(&text.chars().take(64).collect::<String>());
        }
        Action::Key { code, shift, ctrl } => {
            let mut modifiers = KeyModifiers::empty();
            modifiers.set(KeyModifiers::SHIFT, *shift);
            modifiers.set(KeyModifiers::CTRL, *ctrl);
            let code = KEYS[usize::from(*code) % KEYS.len()];
            editor.handle_event(&Event::Key(KeyEvent::new(code, modifiers)));
        }
        Action::Press { x, y, shift } => {
            let mut event = PointerEvent::press(i32::from(*x), i32::from(*y));
            if *shift {
                event = event.with_modifiers(KeyModifiers::SHIFT);
            }
            editor.handle_event(&Event::Pointer(event));
        }
        Action::Drag { x, y } => {
            let event = PointerEvent::move_to(i32::from(*x), i32::from(*y));
            editor.handle_event(&Event::Pointer(event));
        }
        Action::Release { x, y } => {
            let event = PointerEvent::release(i32::from(*x), i32::from(*y));
            editor.handle_event(&Event::Pointer(event));
        }
        Action::Wheel { dx, dy } => {
            let event = PointerEvent::wheel(10, 10, i32::from(*dx), i32::from(*dy));
            editor.handle_event(&Event::Pointer(event));
        }
        Action::Scroll { delta, vertical } => {
            let axis = if *vertical {
                Axis::Vertical
            } else {
                Axis::Horizontal
            };
            editor.scroll(i32::from(*delta), axis);
        }
        Action::Wrap(mode) => editor.set_wrap(match mode % 3 {
            0 => WrapMode::None,
            1 => WrapMode::Char,
            _ => WrapMode::Word,
        }),
        Action::Align(align) => editor.set_alignment(match align % 3 {
            0 => TextAlign::Start,
            1 => TextAlign::Center,
            _ => TextAlign::End,
        }),
        Action::Direction(dir) => editor.set_direction(match dir % 3 {
            0 => Direction::Ltr,
            1 => Direction::Rtl,
            _ => Direction::Neutral,
        }),
        Action::Mask(mask) => editor.set_mask(*mask),
        Action::Editable(editable) => editor.set_editable(*editable),
        Action::Focus(focused) => editor.focus_changed(*focused),
        Action::Resize { width, height } => {
            editor.set_bounds(Rect::new(0, 0, u32::from(*width), u32::from(*height)));
        }
        Action::Undo => {
            editor.undo();
        }
        Action::Redo => {
            editor.redo();
        }
        Action::Render => {
            let mut surface = RecordingSurface::new();
            editor.render(&mut surface);
        }
    }
}

fuzz_target!(|session: Session| {
    let bounds = Rect::new(0, 0, u32::from(session.width), u32::from(session.height));
    let mut editor = Editor::new(bounds);
    editor.set_text(&session.start);
    let start = editor.text();

    for action in session.actions.iter().take(256) {
        apply(&mut editor, action);
        let caret = editor.caret();
        assert!(caret.line < editor.line_count());
        assert!(caret.column <= editor.line_text(caret.line).chars().count());
        editor.take_events();
    }

    editor.set_editable(true);
    while editor.undo() {}
    assert_eq!(editor.text(), start);
});
