use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use utoipa::ToSchema;

use super::CatalogError;

/// Multiplier applied when a submitted service name is not in the table.
pub const FALLBACK_MULTIPLIER: Decimal = Decimal::ONE;

const MAX_BASE_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const MAX_MULTIPLIER: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Stable identifier of a catalog item, used as the form and API key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "shirt")]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from the English part of a bilingual label.
    ///
    /// `Gotra Red/White (شماغ)` becomes `gotra-red-white`. Returns `None` when
    /// the label has no ASCII letters or digits before the first `(`.
    pub fn from_label(label: &str) -> Option<Self> {
        let english = label.split('(').next().unwrap_or_default();
        let mut slug = String::with_capacity(english.len());
        let mut last_dash = false;

        for ch in english.trim().chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
                last_dash = false;
            } else if !last_dash && !slug.is_empty() {
                slug.push('-');
                last_dash = true;
            }
        }

        let slug = slug.trim_matches('-');
        if slug.is_empty() {
            None
        } else {
            Some(Self(slug.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ids end up inside form field names (`items[<id>][quantity]`), so they
    /// are limited to lowercase ASCII letters, digits and dashes.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One billable item.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CatalogEntry {
    pub id: ItemId,
    #[schema(example = "Shirt (قميص)")]
    pub label: String,
    #[schema(value_type = String, example = "1.00")]
    pub base_price: Decimal,
}

impl CatalogEntry {
    /// Build an entry whose id is derived from the label.
    pub fn new(label: impl Into<String>, base_price: Decimal) -> Self {
        let label = label.into();
        let id = ItemId::from_label(&label).unwrap_or_else(|| ItemId::new("item"));
        Self {
            id,
            label,
            base_price,
        }
    }

    pub fn with_id(id: ItemId, label: impl Into<String>, base_price: Decimal) -> Self {
        Self {
            id,
            label: label.into(),
            base_price,
        }
    }
}

/// Ordered, immutable list of billable items. Iteration order is display order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Validate and build a catalog.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !entry.id.is_valid() {
                return Err(CatalogError::InvalidId(entry.id.to_string()));
            }
            if !seen.insert(entry.id.clone()) {
                return Err(CatalogError::DuplicateItem(entry.id.to_string()));
            }
            if entry.base_price.is_sign_negative() || entry.base_price > MAX_BASE_PRICE {
                return Err(CatalogError::InvalidPrice {
                    label: entry.label.clone(),
                    price: entry.base_price,
                });
            }
        }

        Ok(Self { entries })
    }

    pub(crate) fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A named treatment and its price multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ServiceLevel {
    #[schema(example = "iron")]
    pub name: String,
    #[schema(value_type = String, example = "1.2")]
    pub multiplier: Decimal,
}

impl ServiceLevel {
    pub fn new(name: impl Into<String>, multiplier: Decimal) -> Self {
        Self {
            name: name.into(),
            multiplier,
        }
    }
}

/// Outcome of looking up a submitted service name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedService {
    pub name: String,
    pub multiplier: Decimal,
    pub recognized: bool,
}

/// Immutable table of service levels with a designated default.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceTable {
    levels: Vec<ServiceLevel>,
    default_service: String,
}

impl ServiceTable {
    pub fn new(
        levels: Vec<ServiceLevel>,
        default_service: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let default_service = default_service.into();

        let mut seen = HashSet::with_capacity(levels.len());
        for level in &levels {
            if !seen.insert(level.name.as_str()) {
                return Err(CatalogError::DuplicateService(level.name.clone()));
            }
            if level.multiplier <= Decimal::ZERO || level.multiplier > MAX_MULTIPLIER {
                return Err(CatalogError::InvalidMultiplier {
                    name: level.name.clone(),
                    multiplier: level.multiplier,
                });
            }
        }

        if !seen.contains(default_service.as_str()) {
            return Err(CatalogError::UnknownDefaultService(default_service));
        }

        Ok(Self {
            levels,
            default_service,
        })
    }

    pub(crate) fn from_parts(levels: Vec<ServiceLevel>, default_service: String) -> Self {
        Self {
            levels,
            default_service,
        }
    }

    pub fn levels(&self) -> &[ServiceLevel] {
        &self.levels
    }

    pub fn default_service(&self) -> &str {
        &self.default_service
    }

    pub fn multiplier(&self, name: &str) -> Option<Decimal> {
        self.levels
            .iter()
            .find(|level| level.name == name)
            .map(|level| level.multiplier)
    }

    /// Resolve a submitted service name. Never fails: a blank or missing name
    /// selects the default service, an unknown name keeps its text and prices
    /// at [`FALLBACK_MULTIPLIER`].
    pub fn resolve(&self, requested: Option<&str>) -> ResolvedService {
        let name = requested
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.default_service.as_str());

        match self.multiplier(name) {
            Some(multiplier) => ResolvedService {
                name: name.to_string(),
                multiplier,
                recognized: true,
            },
            None => ResolvedService {
                name: name.to_string(),
                multiplier: FALLBACK_MULTIPLIER,
                recognized: false,
            },
        }
    }
}
