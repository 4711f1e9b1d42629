//! Pricing of a submission against the catalog.

use rust_decimal::Decimal;

use super::input::{RawInputs, RawItemInput};
use super::model::{Order, OrderLine};
use crate::catalog::{Catalog, ServiceTable};
use crate::shaping::ascii_digits;

/// Parse a submitted quantity. Anything that is not a whole number that fits
/// in a `u32` yields 0, as does a negative number. Arabic-Indic digits are
/// read like their ASCII counterparts.
pub fn parse_quantity(raw: Option<&str>) -> u32 {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return 0;
    };

    match ascii_digits(text).parse::<i64>() {
        Ok(value) if value > 0 => u32::try_from(value).unwrap_or(0),
        _ => 0,
    }
}

/// Price every catalog item the customer asked for.
///
/// Never fails. Items with no input, a zero/negative/unreadable quantity are
/// left out; unknown services are priced at the base price; inputs for ids
/// that are not in the catalog are ignored.
pub fn build_order(catalog: &Catalog, services: &ServiceTable, raw: &RawInputs) -> Order {
    let empty = RawItemInput::default();
    let mut lines = Vec::new();

    for entry in catalog {
        let input = raw.get(&entry.id).unwrap_or(&empty);

        let quantity = parse_quantity(input.quantity.as_deref());
        if quantity == 0 {
            continue;
        }

        let service = services.resolve(input.service.as_deref());
        if !service.recognized {
            log::debug!(
                "Unknown service '{}' for item {}, pricing at base price",
                service.name,
                entry.id
            );
        }

        let unit_price: Decimal = entry.base_price * service.multiplier;
        let comment = input
            .comment
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        lines.push(OrderLine::new(
            entry.id.clone(),
            entry.label.clone(),
            quantity,
            comment,
            service.name,
            unit_price,
        ));
    }

    for id in raw.ids().filter(|id| !catalog.contains(id)) {
        log::debug!("Ignoring input for unknown item {}", id);
    }

    Order::from_lines(lines)
}
