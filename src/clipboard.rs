//! Clipboard interface.

/// System clipboard provided by the host.
pub trait Clipboard {
    /// Current clipboard text, if any.
    fn get_text(&mut self) -> Option<String>;

    /// Replace the clipboard text.
    fn set_text(&mut self, text: &str);
}

/// In-process clipboard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard holding `text`.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Peek without going through the trait.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
}
