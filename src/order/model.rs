use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::ItemId;

/// One priced entry of an order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderLine {
    pub item_id: ItemId,
    #[schema(example = "Shirt (قميص)")]
    pub label: String,
    #[schema(example = 3)]
    pub quantity: u32,
    #[schema(example = "starch")]
    pub comment: String,
    #[schema(example = "iron")]
    pub service_name: String,
    #[schema(value_type = String, example = "1.2")]
    pub unit_price: Decimal,
    #[schema(value_type = String, example = "3.6")]
    pub line_total: Decimal,
}

impl OrderLine {
    pub fn new(
        item_id: ItemId,
        label: String,
        quantity: u32,
        comment: String,
        service_name: String,
        unit_price: Decimal,
    ) -> Self {
        Self {
            item_id,
            label,
            quantity,
            comment,
            service_name,
            unit_price,
            line_total: unit_price * Decimal::from(quantity),
        }
    }
}

/// An itemized order. The total is always derived from the lines.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Order {
    lines: Vec<OrderLine>,
    #[schema(value_type = String, example = "3.6")]
    total: Decimal,
}

impl Order {
    pub fn from_lines(lines: Vec<OrderLine>) -> Self {
        let total = lines.iter().map(|line| line.line_total).sum();
        Self { lines, total }
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of pieces across all lines.
    pub fn piece_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
