//! Log callback and editor notifications.
//!
//! Logging goes through a process-global callback so that hosts can route
//! engine diagnostics into whatever logging stack they use. Editor
//! notifications are queued per editor instance and drained by the host,
//! so no collaborator is ever called back re-entrantly.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};

use crate::text::Position;

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
        }
    }
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

static MIN_LEVEL: AtomicU8 = AtomicU8::new(0);

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Set the minimum level forwarded to the callback.
pub fn set_log_level(level: LogLevel) {
    MIN_LEVEL.store(level.as_u8(), Ordering::Relaxed);
}

/// Whether a message at `level` would be forwarded.
///
/// Call sites use this to skip formatting when nobody listens.
#[must_use]
pub fn log_enabled(level: LogLevel) -> bool {
    if level.as_u8() < MIN_LEVEL.load(Ordering::Relaxed) {
        return false;
    }
    log_callback().lock().is_ok_and(|guard| guard.is_some())
}

/// Emit a log message.
pub fn emit_log(level: LogLevel, message: &str) {
    if level.as_u8() < MIN_LEVEL.load(Ordering::Relaxed) {
        return;
    }
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

/// Format and emit only when the level is enabled.
macro_rules! log_at {
    ($level:expr, $($arg:tt)*) => {
        if $crate::event::log_enabled($level) {
            $crate::event::emit_log($level, &format!($($arg)*));
        }
    };
}
pub(crate) use log_at;

/// Notification produced by an [`Editor`](crate::Editor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    /// The first modification since the text was set or loaded.
    FirstChange,
    /// The buffer content changed.
    TextChanged,
    /// The caret or selection moved.
    SelectionChanged { anchor: Position, active: Position },
    /// The viewport offsets changed.
    Scrolled { h_offset: i32, v_offset: usize },
    /// The editor needs to be redrawn.
    RenderRequested,
}

/// FIFO of pending editor notifications.
///
/// Consecutive duplicates of payload-free events are coalesced.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: VecDeque<EditorEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event.
    pub fn push(&mut self, event: EditorEvent) {
        let coalesce = matches!(
            event,
            EditorEvent::TextChanged | EditorEvent::RenderRequested
        );
        if coalesce && self.events.contains(&event) {
            return;
        }
        if let EditorEvent::SelectionChanged { .. } = event {
            self.events
                .retain(|e| !matches!(e, EditorEvent::SelectionChanged { .. }));
        }
        if let EditorEvent::Scrolled { .. } = event {
            self.events
                .retain(|e| !matches!(e, EditorEvent::Scrolled { .. }));
        }
        self.events.push_back(event);
    }

    /// Remove and return all pending events in order.
    pub fn drain(&mut self) -> Vec<EditorEvent> {
        self.events.drain(..).collect()
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
