//! Column widths for monospace measurement.

use unicode_width::UnicodeWidthStr;

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Get the column width of a string using a specific method.
#[must_use]
pub fn display_width_with_method(s: &str, method: WidthMethod) -> usize {
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(s),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(s),
    }
}

/// Column width of one grapheme cluster.
///
/// Clusters that would measure zero (a lone combining mark, a control
/// character) still occupy one column so the caret can land on both sides.
#[must_use]
pub fn cluster_width(cluster: &str, method: WidthMethod) -> usize {
    display_width_with_method(cluster, method).max(1)
}
