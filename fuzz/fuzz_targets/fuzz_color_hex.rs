//! Fuzz target for color hex parsing.
//!
//! `Rgba::from_hex` must reject malformed input with an error, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use textedit::color::Rgba;

fuzz_target!(|data: &str| {
    if let Ok(color) = Rgba::from_hex(data) {
        // Anything accepted must survive a second parse of its own digits.
        let digits = data.trim_start_matches('#');
        assert!(Rgba::from_hex(&format!("#{digits}")).is_ok_and(|c| c == color));
    }

    // Every char-boundary suffix, to reach odd lengths and stray prefixes.
    for (i, _) in data.char_indices().take(10) {
        let _ = Rgba::from_hex(&data[i..]);
    }
});
