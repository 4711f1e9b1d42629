//! Arabic text shaping for bilingual catalog labels.
//!
//! Labels look like `Dish Wool (شماغ صوف)`: Latin text with the Arabic name in
//! parentheses. The PDF pipeline draws glyphs in codepoint order without any
//! shaping of its own, so the Arabic part has to be converted to presentation
//! forms and put in visual order before it reaches the page.

pub mod bidi;
pub mod reshaper;


use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::ops::Range;

pub use bidi::visual_order;
pub use reshaper::reshape;

lazy_static! {
    // Single level, non-greedy, no nesting.
    static ref PARENTHESISED: Regex = Regex::new(r"\(([^)]*)\)").unwrap();
}

/// Reshape and reorder a run of Arabic text for left-to-right display.
pub fn shape_text(text: &str) -> String {
    visual_order(&reshape(text))
}

/// Replace Arabic-Indic (U+0660..U+0669) and Extended Arabic-Indic
/// (U+06F0..U+06F9) digits with their ASCII equivalents.
pub fn ascii_digits(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (ch as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (ch as u32 - 0x06F0) as u8),
            _ => ch,
        })
        .collect()
}

/// Byte ranges of the contents of every parenthesised group of `label`, in
/// order. These are exactly the parts [`shape_label`] rewrites.
pub fn group_spans(label: &str) -> Vec<Range<usize>> {
    PARENTHESISED
        .captures_iter(label)
        .filter_map(|caps| caps.get(1).map(|inner| inner.range()))
        .collect()
}

/// Shape every parenthesised group of `label`, leaving the rest untouched.
///
/// The parenthesis characters themselves are emitted literally, so they stay
/// at the same boundary around the shaped content.
pub fn shape_label(label: &str) -> String {
    PARENTHESISED
        .replace_all(label, |caps: &Captures| format!("({})", shape_text(&caps[1])))
        .into_owned()
}
