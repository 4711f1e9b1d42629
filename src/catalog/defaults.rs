use rust_decimal::Decimal;

use super::model::{CatalogEntry, ServiceLevel};

pub(super) const DEFAULT_SERVICE: &str = "wash";

/// `price(25, 2)` is 0.25.
fn price(mantissa: i64, scale: u32) -> Decimal {
    Decimal::new(mantissa, scale)
}

pub(super) fn items() -> Vec<CatalogEntry> {
    [
        ("Dish Wool (شماغ صوف)", price(25, 2)),
        ("Dishd C (ثوب قطن)", price(25, 2)),
        ("Gotra Red/White (شماغ)", price(25, 2)),
        ("Cap (طاقية)", price(15, 2)),
        ("Pajama (بيجامة)", price(5, 1)),
        ("Vest (سديري)", price(75, 2)),
        ("Underwear (ملابس داخلية)", price(25, 2)),
        ("Army Suit (بدلة عسكرية)", price(15, 1)),
        ("Shirt (قميص)", price(10, 1)),
        ("Trousers (بنطلون)", price(10, 1)),
        ("Jackets (جاكيت)", price(125, 2)),
        ("Large Coat (بالطو)", price(25, 1)),
        ("Ladies Dress (فستان حريمي)", price(20, 1)),
        ("Abaya (عباية)", price(175, 2)),
        ("Hezab (حجاب)", price(5, 1)),
        ("Skirt (تنورة)", price(75, 2)),
        ("Blouse (بلوزة)", price(5, 1)),
        ("Bath Towel (منشفة حمام)", price(5, 1)),
        ("Blanket/Dibaz (بطانية / دثار)", price(35, 1)),
        ("Bed Sheet (شرشف سرير)", price(25, 1)),
        ("Pillow Case (كيس مخدة)", price(5, 1)),
        ("Curtain (ستارة)", price(40, 1)),
    ]
    .into_iter()
    .map(|(label, base_price)| CatalogEntry::new(label, base_price))
    .collect()
}

pub(super) fn services() -> Vec<ServiceLevel> {
    vec![
        ServiceLevel::new(DEFAULT_SERVICE, Decimal::ONE),
        ServiceLevel::new("iron", price(12, 1)),
        ServiceLevel::new("wash_and_iron", price(15, 1)),
    ]
}
