//! Order module - turns raw submissions into priced orders.

pub mod builder;
pub mod input;
pub mod model;


pub use builder::{build_order, parse_quantity};
pub use input::{RawInputs, RawItemInput};
pub use model::{Order, OrderLine};
