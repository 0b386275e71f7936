//! Bidirectional (BiDi) text segmentation.
//!
//! Wraps the Unicode Bidirectional Algorithm (UAX #9) from `unicode-bidi`
//! and exposes the result as [`TextSection`]s: maximal runs of one
//! direction, listed in visual (left-to-right on screen) order. Offsets are
//! in `char`s to match caret columns.

use std::ops::Range;

use unicode_bidi::{BidiClass, BidiInfo as UnicodeBidiInfo, Level};

/// Writing direction of a paragraph or section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
    /// No strong direction; as a paragraph base this means auto-detect.
    Neutral,
}

impl Direction {
    fn paragraph_level(self) -> Option<Level> {
        match self {
            Self::Ltr => Some(Level::ltr()),
            Self::Rtl => Some(Level::rtl()),
            Self::Neutral => None,
        }
    }
}

/// A contiguous run of one direction inside a visual line.
///
/// `x` and `width` are filled in by the layout engine; the segmenter leaves
/// them at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextSection {
    /// First char of the run (logical offset within the line).
    pub start: usize,
    /// Number of chars in the run.
    pub len: usize,
    /// `Ltr` or `Rtl`.
    pub direction: Direction,
    /// Resolved embedding level.
    pub level: u8,
    /// Pixel offset of the run's left edge within its visual line.
    pub x: u32,
    /// Pixel width of the run.
    pub width: u32,
}

impl TextSection {
    /// Exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    /// Check if the run is right-to-left.
    #[must_use]
    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::Rtl
    }

    /// Check if `col` (a char offset) lies inside the run.
    #[must_use]
    pub const fn contains(&self, col: usize) -> bool {
        col >= self.start && col < self.end()
    }

    /// Char range covered by the run.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Result of resolving BiDi embedding levels for a string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidiInfo {
    /// Detected base direction.
    pub base_direction: Direction,
    /// Embedding level per Unicode scalar value (`char`).
    pub levels: Vec<u8>,
}

/// Resolve bidirectional embedding levels for `text`.
///
/// `base` fixes the paragraph level; `Direction::Neutral` detects it from
/// the first strong character.
#[must_use]
pub fn resolve_bidi(text: &str, base: Direction) -> BidiInfo {
    if text.is_empty() {
        return BidiInfo {
            base_direction: Direction::Neutral,
            levels: Vec::new(),
        };
    }

    let bidi = UnicodeBidiInfo::new(text, base.paragraph_level());
    // `unicode-bidi` stores one level per byte, repeated across the bytes of
    // a multi-byte code point; sample the first byte of each char.
    let levels = text
        .char_indices()
        .map(|(byte_idx, _)| bidi.levels[byte_idx].number())
        .collect();

    BidiInfo {
        base_direction: detect_base_direction(text),
        levels,
    }
}

/// Direction of the first strong character, or `Neutral`.
#[must_use]
pub fn detect_base_direction(text: &str) -> Direction {
    for ch in text.chars() {
        match unicode_bidi::bidi_class(ch) {
            BidiClass::L => return Direction::Ltr,
            BidiClass::R | BidiClass::AL => return Direction::Rtl,
            _ => {}
        }
    }
    Direction::Neutral
}

/// Resolved BiDi state of one logical line, reusable across its sub-lines.
pub struct BidiParagraph<'a> {
    info: UnicodeBidiInfo<'a>,
    /// Byte offset of each char, plus the total length.
    byte_offsets: Vec<usize>,
    all_ltr: bool,
    base_rtl: bool,
}

impl<'a> BidiParagraph<'a> {
    /// Resolve levels for `text` with the given paragraph base.
    #[must_use]
    pub fn new(text: &'a str, base: Direction) -> Self {
        let info = UnicodeBidiInfo::new(text, base.paragraph_level());
        let mut byte_offsets: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        byte_offsets.push(text.len());
        let all_ltr = info.levels.iter().all(|level| level.number() == 0);
        let base_rtl = info
            .paragraphs
            .first()
            .map_or(base == Direction::Rtl, |para| para.level.is_rtl());
        Self {
            info,
            byte_offsets,
            all_ltr,
            base_rtl,
        }
    }

    /// Resolved paragraph direction, `Ltr` or `Rtl`.
    #[must_use]
    pub fn base_direction(&self) -> Direction {
        if self.base_rtl {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    /// Number of chars in the paragraph text.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.byte_offsets.len() - 1
    }

    /// Check if no reordering can happen.
    #[must_use]
    pub fn is_pure_ltr(&self) -> bool {
        self.all_ltr
    }

    fn byte_to_char(&self, byte: usize) -> usize {
        self.byte_offsets.partition_point(|&b| b < byte)
    }

    /// Sections covering `chars` (clamped), in visual order.
    ///
    /// The sections tile the range exactly: no gaps, no overlaps.
    #[must_use]
    pub fn line_sections(&self, chars: Range<usize>) -> Vec<TextSection> {
        let count = self.char_count();
        let start = chars.start.min(count);
        let end = chars.end.clamp(start, count);
        if start == end {
            return Vec::new();
        }

        if self.all_ltr {
            return vec![TextSection {
                start,
                len: end - start,
                direction: Direction::Ltr,
                level: 0,
                ..TextSection::default()
            }];
        }

        let byte_range = self.byte_offsets[start]..self.byte_offsets[end];
        let mut sections = Vec::new();
        for para in &self.info.paragraphs {
            let line_start = para.range.start.max(byte_range.start);
            let line_end = para.range.end.min(byte_range.end);
            if line_start >= line_end {
                continue;
            }
            let (levels, runs) = self.info.visual_runs(para, line_start..line_end);
            for run in runs {
                if run.is_empty() {
                    continue;
                }
                let level = levels[run.start];
                let run_start = self.byte_to_char(run.start);
                let run_end = self.byte_to_char(run.end);
                sections.push(TextSection {
                    start: run_start,
                    len: run_end - run_start,
                    direction: if level.is_rtl() {
                        Direction::Rtl
                    } else {
                        Direction::Ltr
                    },
                    level: level.number(),
                    ..TextSection::default()
                });
            }
        }
        sections
    }
}

/// Sections of a whole line in visual order.
#[must_use]
pub fn visual_sections(text: &str, base: Direction) -> Vec<TextSection> {
    let para = BidiParagraph::new(text, base);
    para.line_sections(0..para.char_count())
}
