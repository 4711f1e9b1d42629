//! JSON catalog files.
//!
//! ```json
//! {
//!   "items": [{ "label": "Shirt (قميص)", "price": "1.00" }],
//!   "services": [{ "name": "wash", "multiplier": "1.0" }],
//!   "default_service": "wash"
//! }
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::model::{Catalog, CatalogEntry, ItemId, ServiceLevel, ServiceTable};
use super::CatalogError;

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub items: Vec<CatalogFileItem>,
    pub services: Vec<CatalogFileService>,
    #[serde(default)]
    pub default_service: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogFileItem {
    #[serde(default)]
    pub id: Option<String>,
    pub label: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CatalogFileService {
    pub name: String,
    pub multiplier: Decimal,
}

impl CatalogFile {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the file contents and build both tables.
    pub fn into_tables(self) -> Result<(Catalog, ServiceTable), CatalogError> {
        let entries = self
            .items
            .into_iter()
            .map(|item| -> Result<CatalogEntry, CatalogError> {
                let id = match item.id.as_deref().map(str::trim) {
                    Some(id) if !id.is_empty() => ItemId::new(id),
                    _ => ItemId::from_label(&item.label)
                        .ok_or_else(|| CatalogError::MissingId(item.label.clone()))?,
                };
                Ok(CatalogEntry::with_id(id, item.label, item.price))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let levels: Vec<ServiceLevel> = self
            .services
            .into_iter()
            .map(|service| ServiceLevel::new(service.name, service.multiplier))
            .collect();

        let default_service = match self.default_service {
            Some(name) => name,
            None => levels
                .first()
                .map(|level| level.name.clone())
                .unwrap_or_default(),
        };

        let catalog = Catalog::new(entries)?;
        let services = ServiceTable::new(levels, default_service)?;
        Ok((catalog, services))
    }
}

/// Load the catalog and service table from a JSON file.
pub fn load_tables(path: impl AsRef<Path>) -> Result<(Catalog, ServiceTable), CatalogError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let tables = CatalogFile::from_json(&json)?.into_tables()?;
    log::info!(
        "Loaded catalog from {} ({} items, {} service levels)",
        path.display(),
        tables.0.len(),
        tables.1.levels().len()
    );
    Ok(tables)
}
