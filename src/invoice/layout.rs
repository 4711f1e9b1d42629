//! Text content of an invoice, independent of the page format.

use rust_decimal::Decimal;

use super::Invoice;
use crate::order::OrderLine;
use crate::shaping::{group_spans, shape_text};
use std::ops::Range;

pub const TITLE: &str = "Laundry Invoice";

/// Two-decimal money formatting. Rounding happens here and nowhere earlier.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

/// One order line in logical order, before any shaping.
pub fn line_text(line: &OrderLine) -> String {
    format!(
        "{}: {} x {} = {} (Service: {}, Comment: {})",
        line.label,
        line.quantity,
        format_amount(line.unit_price),
        format_amount(line.line_total),
        line.service_name,
        line.comment
    )
}

/// Printed lines of one order line.
///
/// Wrapping works on the logical text; each printed line then has its share
/// of the label's parenthesised groups shaped on its own, so an Arabic name
/// that spans two lines still reads top to bottom. The comment is printed as
/// typed.
pub fn entry_lines(line: &OrderLine, width: usize) -> Vec<String> {
    let text = line_text(line);
    // The label opens the text, so its spans are valid offsets into `text`.
    let groups = group_spans(&line.label);

    wrap_ranges(&text, width)
        .into_iter()
        .map(|range| shape_within(&text, range, &groups))
        .collect()
}

fn shape_within(text: &str, range: Range<usize>, groups: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(range.len());
    let mut cursor = range.start;

    for group in groups {
        let start = group.start.max(range.start);
        let end = group.end.min(range.end);
        if start >= end {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str(&shape_text(&text[start..end]));
        cursor = end;
    }

    out.push_str(&text[cursor..range.end]);
    out
}

/// Break `text` into lines of at most `width` characters, preferring spaces.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    wrap_ranges(text, width)
        .into_iter()
        .map(|range| text[range].to_string())
        .collect()
}

/// Byte ranges of the lines [`wrap`] produces. The space a line breaks at
/// belongs to neither line.
fn wrap_ranges(text: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut line_end = 0;
    let mut line_len = 0;
    let mut offset = 0;

    for word in text.split(' ') {
        let word_start = offset;
        offset += word.len() + 1;
        let word_len = word.chars().count();

        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(line_start..line_end);
            line_len = 0;
        }

        if line_len == 0 {
            line_start = word_start;
        } else {
            line_len += 1;
        }

        let mut pos = word_start;
        let mut remaining = word_len;
        while line_len + remaining > width {
            let take = width - line_len;
            pos += text[pos..]
                .chars()
                .take(take)
                .map(char::len_utf8)
                .sum::<usize>();
            lines.push(line_start..pos);
            line_start = pos;
            line_len = 0;
            remaining -= take;
        }
        line_len += remaining;
        line_end = word_start + word.len();
    }

    if line_len > 0 || lines.is_empty() {
        lines.push(line_start..line_end);
    }
    lines
}

/// Every printable line of an invoice, grouped by section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLayout {
    pub title: String,
    pub header: Vec<String>,
    /// One group of wrapped lines per order line.
    pub entries: Vec<Vec<String>>,
    pub total: String,
}

impl InvoiceLayout {
    pub fn build(invoice: &Invoice, width: usize) -> Self {
        let order = &invoice.order;
        let header = vec![
            format!("Invoice: {}", invoice.number),
            format!("Date: {}", invoice.issued_on.format("%Y-%m-%d")),
            format!("Pieces: {}", order.piece_count()),
        ];

        let entries = order
            .lines()
            .iter()
            .map(|line| entry_lines(line, width))
            .collect();

        Self {
            title: TITLE.to_string(),
            header,
            entries,
            total: format!("Total: {}", format_amount(order.total())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemId;
    use crate::order::Order;
    use crate::shaping::shape_label;
    use chrono::NaiveDate;

    fn shirt_line() -> OrderLine {
        OrderLine::new(
            ItemId::new("shirt"),
            "Shirt (قميص)".to_string(),
            3,
            "starch".to_string(),
            "iron".to_string(),
            Decimal::new(12, 1),
        )
    }

    #[test]
    fn amounts_have_two_decimals() {
        assert_eq!(format_amount(Decimal::new(36, 1)), "3.60");
        assert_eq!(format_amount(Decimal::new(4, 0)), "4.00");
        assert_eq!(format_amount(Decimal::new(1875, 3)), "1.88");
        assert_eq!(format_amount(Decimal::new(1125, 3)), "1.12");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    #[test]
    fn entry_shapes_the_label_and_keeps_the_comment_raw() {
        let mut line = shirt_line();
        line.comment = "نشا".to_string();
        let lines = entry_lines(&line, 80);

        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            format!(
                "{}: 3 x 1.20 = 3.60 (Service: iron, Comment: نشا)",
                shape_label("Shirt (قميص)")
            )
        );
    }

    #[test]
    fn arabic_name_split_across_lines_keeps_reading_order() {
        let mut line = shirt_line();
        line.label = "Rug (سجادة كبيرة جدا)".to_string();

        let lines = entry_lines(&line, 12);

        assert_eq!(lines[0], format!("Rug ({}", shape_text("سجادة")));
        assert_eq!(lines[1], format!("{}):", shape_text("كبيرة جدا")));
        for printed in &lines {
            assert!(printed.chars().count() <= 12, "{printed:?}");
        }
    }

    #[test]
    fn wrap_prefers_spaces_and_splits_long_words() {
        assert_eq!(wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("short", 80), vec!["short"]);
    }

    #[test]
    fn wrapped_lines_never_exceed_width() {
        let text = "Blanket/Dibaz (x): 2 x 3.50 = 7.00 (Service: wash_and_iron, Comment: please handle the embroidered border very carefully)";
        for line in wrap(text, 24) {
            assert!(line.chars().count() <= 24, "{line:?}");
        }
    }

    #[test]
    fn layout_contains_header_entries_and_total() {
        let order = Order::from_lines(vec![shirt_line()]);
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let invoice = super::super::Invoice::new(order, date);

        let layout = InvoiceLayout::build(&invoice, 80);

        assert_eq!(layout.title, "Laundry Invoice");
        assert!(layout.header[0].starts_with("Invoice: INV-20261019-"));
        assert_eq!(layout.header[1], "Date: 2026-10-19");
        assert_eq!(layout.header[2], "Pieces: 3");
        assert_eq!(layout.entries.len(), 1);
        assert_eq!(layout.total, "Total: 3.60");
    }
}
