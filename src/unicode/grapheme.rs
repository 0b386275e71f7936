//! Grapheme cluster boundaries and word classification.
//!
//! Caret columns are `char` offsets, so everything here reports offsets in
//! chars rather than bytes.

use unicode_segmentation::UnicodeSegmentation;

/// Iterate over grapheme clusters with their starting char offset.
pub fn cluster_indices(s: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut chars_seen = 0usize;
    s.graphemes(true).map(move |g| {
        let start = chars_seen;
        chars_seen += g.chars().count();
        (start, g)
    })
}

/// Boundary flags indexed by char offset.
///
/// The result has `char_count + 1` entries; entry `i` is `true` when a
/// caret may sit before char `i`. Both ends are always boundaries.
#[must_use]
pub fn cluster_boundaries(s: &str) -> Vec<bool> {
    let count = s.chars().count();
    let mut flags = vec![false; count + 1];
    for (start, _) in cluster_indices(s) {
        flags[start] = true;
    }
    flags[count] = true;
    flags
}

/// Previous boundary strictly before `col`, or 0.
#[must_use]
pub fn prev_boundary(boundaries: &[bool], col: usize) -> usize {
    let col = col.min(boundaries.len().saturating_sub(1));
    (0..col).rev().find(|&i| boundaries[i]).unwrap_or(0)
}

/// Next boundary strictly after `col`, or the last offset.
#[must_use]
pub fn next_boundary(boundaries: &[bool], col: usize) -> usize {
    let last = boundaries.len().saturating_sub(1);
    ((col + 1)..=last).find(|&i| boundaries[i]).unwrap_or(last)
}

/// Snap `col` to the nearest boundary at or before it.
#[must_use]
pub fn floor_boundary(boundaries: &[bool], col: usize) -> usize {
    let col = col.min(boundaries.len().saturating_sub(1));
    (0..=col).rev().find(|&i| boundaries[i]).unwrap_or(0)
}

/// Characters that belong to words for whole-word matching and word motion.
#[must_use]
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// End of the next word at or after `col`.
#[must_use]
pub fn next_word_boundary(chars: &[char], col: usize) -> usize {
    let mut idx = col.min(chars.len());
    while idx < chars.len() && !is_word_char(chars[idx]) {
        idx += 1;
    }
    while idx < chars.len() && is_word_char(chars[idx]) {
        idx += 1;
    }
    idx
}

/// Start of the word before `col`.
#[must_use]
pub fn prev_word_boundary(chars: &[char], col: usize) -> usize {
    let mut idx = col.min(chars.len());
    while idx > 0 && !is_word_char(chars[idx - 1]) {
        idx -= 1;
    }
    while idx > 0 && is_word_char(chars[idx - 1]) {
        idx -= 1;
    }
    idx
}
