//! Unicode utilities: grapheme boundaries, column widths and BiDi runs.

pub mod bidi;
mod grapheme;
mod width;

pub use bidi::{
    BidiInfo, BidiParagraph, Direction, TextSection, detect_base_direction, resolve_bidi,
    visual_sections,
};
pub use grapheme::{
    cluster_boundaries, cluster_indices, floor_boundary, is_word_char, next_boundary,
    next_word_boundary, prev_boundary, prev_word_boundary,
};
pub use width::{WidthMethod, cluster_width, display_width_with_method};
