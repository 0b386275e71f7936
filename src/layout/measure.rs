//! Font metrics.

use crate::unicode::{WidthMethod, cluster_indices, cluster_width};

/// Font selection passed through to the measurer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Font {
    pub family: String,
    /// Nominal size in pixels.
    pub size: u32,
}

impl Font {
    #[must_use]
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("monospace", 16)
    }
}

/// Text metrics provider.
///
/// Implementations must be deterministic: the same text and font always
/// measure the same, otherwise cached layouts go stale silently.
pub trait Measurer {
    /// Advance width of `text` in pixels.
    fn measure(&self, text: &str, font: &Font) -> u32;

    /// Height of one visual row in pixels.
    fn line_height(&self, font: &Font) -> u32;

    /// Average character width, used for tab stops and horizontal scrolling.
    fn average_char_width(&self, font: &Font) -> u32;
}

/// Fixed-cell measurer: every column is `cell_width` pixels wide.
///
/// Column counts come from `unicode-width`, so CJK ideographs take two
/// cells. The font is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonospaceMeasurer {
    pub cell_width: u32,
    pub line_height: u32,
    pub method: WidthMethod,
}

impl MonospaceMeasurer {
    #[must_use]
    pub fn new(cell_width: u32, line_height: u32) -> Self {
        Self {
            cell_width,
            line_height,
            method: WidthMethod::default(),
        }
    }

    /// Use a different width method for ambiguous characters.
    #[must_use]
    pub fn with_method(mut self, method: WidthMethod) -> Self {
        self.method = method;
        self
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

impl Measurer for MonospaceMeasurer {
    fn measure(&self, text: &str, _font: &Font) -> u32 {
        let columns: usize = cluster_indices(text)
            .map(|(_, cluster)| cluster_width(cluster, self.method))
            .sum();
        u32::try_from(columns)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.cell_width)
    }

    fn line_height(&self, _font: &Font) -> u32 {
        self.line_height
    }

    fn average_char_width(&self, _font: &Font) -> u32 {
        self.cell_width
    }
}
