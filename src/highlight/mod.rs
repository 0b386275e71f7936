//! Keyword highlighting.
//!
//! Rules are literal patterns (not regular expressions) keyed by pattern.
//! Each rule names a style; several rules may share one style. Matching is
//! per line and reports every rule's matches, so spans of different rules
//! may overlap. [`KeywordHighlighter::resolve_colors`] settles overlaps for
//! rendering: the earliest span wins, and among spans starting together the
//! longest one.
//!
//! # Examples
//!
//! ```
//! use textedit::highlight::{HighlightStyle, KeywordHighlighter, KeywordRule};
//! use textedit::Rgba;
//!
//! let mut hl = KeywordHighlighter::new();
//! hl.set_style("error", HighlightStyle::fg(Rgba::RED));
//! hl.set_keyword(KeywordRule::new("error", "error").case_insensitive().whole_word())
//!     .unwrap();
//!
//! let spans = hl.find_spans("Error: errorcode");
//! assert_eq!(spans.len(), 1);
//! assert_eq!((spans[0].start, spans[0].len), (0, 5));
//! ```

mod keyword;

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};

pub use keyword::{HighlightStyle, KeywordRule, KeywordSpan};

/// Keyword rules and the styles they refer to.
#[derive(Clone, Debug, Default)]
pub struct KeywordHighlighter {
    rules: BTreeMap<String, KeywordRule>,
    styles: HashMap<String, HighlightStyle>,
}

impl KeywordHighlighter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the style called `name`.
    pub fn set_style(&mut self, name: impl Into<String>, style: HighlightStyle) {
        self.styles.insert(name.into(), style);
    }

    /// Remove a style. Rules that use it stop rendering but stay registered.
    pub fn erase_style(&mut self, name: &str) -> bool {
        self.styles.remove(name).is_some()
    }

    #[must_use]
    pub fn style(&self, name: &str) -> Option<HighlightStyle> {
        self.styles.get(name).copied()
    }

    /// Register or replace the rule for `rule.pattern`.
    pub fn set_keyword(&mut self, rule: KeywordRule) -> Result<()> {
        if rule.pattern.is_empty() {
            return Err(Error::EmptyPattern);
        }
        self.rules.insert(rule.pattern.clone(), rule);
        Ok(())
    }

    /// Remove the rule for `pattern`.
    pub fn erase_keyword(&mut self, pattern: &str) -> bool {
        self.rules.remove(pattern).is_some()
    }

    #[must_use]
    pub fn rule(&self, pattern: &str) -> Option<&KeywordRule> {
        self.rules.get(pattern)
    }

    /// Registered rules in pattern order.
    pub fn rules(&self) -> impl Iterator<Item = &KeywordRule> {
        self.rules.values()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Drop all rules and styles.
    pub fn clear(&mut self) {
        self.rules.clear();
        self.styles.clear();
    }

    /// Every rule's matches in `line`, sorted by start, longer spans first.
    #[must_use]
    pub fn find_spans(&self, line: &str) -> Vec<KeywordSpan<'_>> {
        if self.rules.is_empty() {
            return Vec::new();
        }
        let chars: Vec<char> = line.chars().collect();
        let mut spans: Vec<KeywordSpan<'_>> = self
            .rules
            .values()
            .flat_map(|rule| {
                rule.find_in(&chars)
                    .into_iter()
                    .map(move |range| KeywordSpan {
                        start: range.start,
                        len: range.len(),
                        rule,
                    })
            })
            .collect();
        spans.sort_by_key(|span| (span.start, Reverse(span.len)));
        spans
    }

    /// Colours for a span's rule, if its style is registered.
    #[must_use]
    pub fn style_for(&self, rule: &KeywordRule) -> Option<HighlightStyle> {
        self.style(&rule.name)
    }

    /// Per-char style for a line of `char_count` chars.
    ///
    /// `spans` must be sorted as [`find_spans`](Self::find_spans) returns
    /// them. A char takes the style of the first span that covers it.
    #[must_use]
    pub fn resolve_colors(
        &self,
        char_count: usize,
        spans: &[KeywordSpan<'_>],
    ) -> Vec<Option<HighlightStyle>> {
        let mut colors = vec![None; char_count];
        for span in spans {
            let Some(style) = self.style_for(span.rule) else {
                continue;
            };
            let end = span.end().min(char_count);
            for slot in colors.iter_mut().take(end).skip(span.start) {
                if slot.is_none() {
                    *slot = Some(style);
                }
            }
        }
        colors
    }
}
