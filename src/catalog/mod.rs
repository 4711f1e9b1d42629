//! Catalog module - billable items and service levels.
//!
//! Both tables are built once at startup, either from the built-in laundry
//! price list or from a JSON file, and then shared read-only.

mod defaults;
pub mod loader;
pub mod model;


pub use loader::{load_tables, CatalogFile};
pub use model::{
    Catalog, CatalogEntry, ItemId, ResolvedService, ServiceLevel, ServiceTable,
    FALLBACK_MULTIPLIER,
};

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building or loading the price tables.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has no items")]
    Empty,
    #[error("duplicate catalog item id '{0}'")]
    DuplicateItem(String),
    #[error("duplicate service level '{0}'")]
    DuplicateService(String),
    #[error("price {price} of '{label}' is out of range")]
    InvalidPrice { label: String, price: Decimal },
    #[error("multiplier {multiplier} of service '{name}' is out of range")]
    InvalidMultiplier { name: String, multiplier: Decimal },
    #[error("default service '{0}' is not in the service table")]
    UnknownDefaultService(String),
    #[error("catalog item '{0}' has no usable id")]
    MissingId(String),
    #[error("catalog item id '{0}' may only contain lowercase letters, digits and dashes")]
    InvalidId(String),
}

impl Catalog {
    /// The laundry price list the shop currently uses.
    pub fn builtin() -> Self {
        Catalog::from_entries(defaults::items())
    }
}

impl ServiceTable {
    /// `wash`, `iron` and `wash_and_iron`, defaulting to `wash`.
    pub fn builtin() -> Self {
        ServiceTable::from_parts(defaults::services(), defaults::DEFAULT_SERVICE.to_string())
    }
}
