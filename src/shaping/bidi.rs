//! Visual reordering with the Unicode Bidirectional Algorithm.

use unicode_bidi::BidiInfo;

/// Reorder logically ordered `text` into display order for a renderer that
/// lays glyphs out strictly left to right.
///
/// The paragraph direction is taken from the first strong character, so a
/// purely Arabic string comes out reversed while embedded digits and Latin
/// runs keep their own reading order.
pub fn visual_order(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let bidi_info = BidiInfo::new(text, None);
    if !bidi_info.has_rtl() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for paragraph in &bidi_info.paragraphs {
        let line = paragraph.range.clone();
        out.push_str(&bidi_info.reorder_line(paragraph, line));
    }
    out
}
