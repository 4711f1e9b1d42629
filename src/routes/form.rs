//! HTML pages for the counter staff: the order form and the result page.

use std::fmt::Write;

use crate::catalog::{Catalog, ServiceTable};
use crate::invoice::{format_amount, IssuedInvoice};
use crate::order::input::{field_name, ItemField};

/// Form field carrying the customer's phone number.
pub const PHONE_FIELD: &str = "phone";

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}\
td,th{padding:4px 8px;border-bottom:1px solid #ddd;text-align:left}\
.notice{padding:8px;background:#fff4d6;border:1px solid #e0c060}\
.ok{background:#e4f6e4;border-color:#6ab46a}";

/// Escape text for HTML element content and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

pub fn order_form_page(catalog: &Catalog, services: &ServiceTable) -> String {
    let mut body = String::new();
    body.push_str("<h1>Laundry Order</h1>\n<form method=\"post\" action=\"/\">\n<table>\n");
    body.push_str(
        "<tr><th>Item</th><th>Price</th><th>Quantity</th><th>Service</th><th>Comment</th></tr>\n",
    );

    for entry in catalog {
        let _ = write!(
            body,
            "<tr><td dir=\"auto\">{}</td><td>{}</td>\
             <td><input type=\"number\" min=\"0\" step=\"1\" value=\"0\" name=\"{}\"></td>\
             <td><select name=\"{}\">",
            escape_html(&entry.label),
            format_amount(entry.base_price),
            escape_html(&field_name(&entry.id, ItemField::Quantity)),
            escape_html(&field_name(&entry.id, ItemField::Service)),
        );
        for level in services.levels() {
            let selected = if level.name == services.default_service() {
                " selected"
            } else {
                ""
            };
            let _ = write!(
                body,
                "<option value=\"{0}\"{1}>{0}</option>",
                escape_html(&level.name),
                selected
            );
        }
        let _ = writeln!(
            body,
            "</select></td><td><input type=\"text\" name=\"{}\"></td></tr>",
            escape_html(&field_name(&entry.id, ItemField::Comment)),
        );
    }

    let _ = write!(
        body,
        "</table>\n<p><label>WhatsApp number <input type=\"tel\" name=\"{PHONE_FIELD}\"></label></p>\n\
         <p><button type=\"submit\">Create invoice</button></p>\n</form>\n"
    );

    page("Laundry Order", &body)
}

pub fn issued_page(issued: &IssuedInvoice) -> String {
    let invoice = &issued.invoice;
    let notice_class = if issued.delivery.is_sent() {
        "notice ok"
    } else {
        "notice"
    };

    let mut body = String::new();
    let _ = writeln!(
        body,
        "<h1>Invoice {}</h1>\n<p>Date: {}</p>",
        escape_html(&invoice.number),
        invoice.issued_on.format("%Y-%m-%d")
    );

    if invoice.order.is_empty() {
        body.push_str("<p>No items were ordered.</p>\n");
    } else {
        body.push_str("<table>\n<tr><th>Item</th><th>Qty</th><th>Unit</th><th>Total</th><th>Service</th><th>Comment</th></tr>\n");
        for line in invoice.order.lines() {
            let _ = writeln!(
                body,
                "<tr><td dir=\"auto\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&line.label),
                line.quantity,
                format_amount(line.unit_price),
                format_amount(line.line_total),
                escape_html(&line.service_name),
                escape_html(&line.comment),
            );
        }
        body.push_str("</table>\n");
    }

    let _ = writeln!(
        body,
        "<p><strong>Total: {}</strong></p>\n<p><a href=\"{}\">Download PDF</a></p>\n\
         <p class=\"{}\">{}</p>\n<p><a href=\"/\">New order</a></p>",
        format_amount(invoice.order.total()),
        escape_html(&issued.document.url),
        notice_class,
        escape_html(&issued.delivery.notice()),
    );

    page(&format!("Invoice {}", invoice.number), &body)
}

/// Page shown when an invoice could not be produced.
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Invoice not created</h1>\n<p class=\"notice\">{}</p>\n<p><a href=\"/\">Back to the order form</a></p>\n",
        escape_html(message)
    );
    page("Invoice not created", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("قميص"), "قميص");
    }

    #[test]
    fn form_lists_every_item_and_service() {
        let catalog = Catalog::builtin();
        let services = ServiceTable::builtin();
        let html = order_form_page(&catalog, &services);

        for entry in &catalog {
            assert!(html.contains(&escape_html(&entry.label)), "{}", entry.label);
            assert!(html.contains(&format!("items[{}][quantity]", entry.id)));
        }
        assert_eq!(
            html.matches("<option value=\"wash\" selected>").count(),
            catalog.len()
        );
        assert!(html.contains("<option value=\"wash_and_iron\">"));
        assert!(html.contains("name=\"phone\""));
    }

    #[test]
    fn error_page_escapes_the_message() {
        let html = error_page("disk <full>");
        assert!(html.contains("disk &lt;full&gt;"));
    }
}
