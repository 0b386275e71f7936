//! Keyword rules and match spans.

use std::ops::Range;

use crate::color::Rgba;
use crate::unicode::is_word_char;

/// Colours applied to matched text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HighlightStyle {
    pub foreground: Rgba,
    /// `Rgba::TRANSPARENT` keeps the editor background.
    pub background: Rgba,
}

impl HighlightStyle {
    #[must_use]
    pub const fn new(foreground: Rgba, background: Rgba) -> Self {
        Self {
            foreground,
            background,
        }
    }

    /// Foreground only.
    #[must_use]
    pub const fn fg(foreground: Rgba) -> Self {
        Self::new(foreground, Rgba::TRANSPARENT)
    }
}

/// A literal pattern to highlight, linked to a style by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeywordRule {
    pub pattern: String,
    /// Style name this rule renders with.
    pub name: String,
    pub case_sensitive: bool,
    /// Only match when not surrounded by word characters.
    pub whole_word: bool,
}

impl KeywordRule {
    /// Case-sensitive, substring-matching rule.
    #[must_use]
    pub fn new(pattern: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            name: name.into(),
            case_sensitive: true,
            whole_word: false,
        }
    }

    #[must_use]
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    #[must_use]
    pub fn whole_word(mut self) -> Self {
        self.whole_word = true;
        self
    }

    /// All non-overlapping matches in `chars`, as char ranges.
    #[must_use]
    pub fn find_in(&self, chars: &[char]) -> Vec<Range<usize>> {
        let pattern: Vec<char> = self.pattern.chars().map(|c| self.fold(c)).collect();
        let m = pattern.len();
        let n = chars.len();
        let mut found = Vec::new();
        if m == 0 || m > n {
            return found;
        }

        let mut i = 0;
        while i + m <= n {
            let hit = chars[i..i + m]
                .iter()
                .zip(&pattern)
                .all(|(&c, &p)| self.fold(c) == p)
                && (!self.whole_word
                    || ((i == 0 || !is_word_char(chars[i - 1]))
                        && (i + m == n || !is_word_char(chars[i + m]))));
            if hit {
                found.push(i..i + m);
                i += m;
            } else {
                i += 1;
            }
        }
        found
    }

    fn fold(&self, c: char) -> char {
        if self.case_sensitive {
            return c;
        }
        let mut lower = c.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(l), None) => l,
            _ => c,
        }
    }
}

/// One match of a rule in a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeywordSpan<'a> {
    /// First char of the match.
    pub start: usize,
    /// Length in chars.
    pub len: usize,
    pub rule: &'a KeywordRule,
}

impl KeywordSpan<'_> {
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}
