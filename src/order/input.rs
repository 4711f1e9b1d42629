//! Raw per-item submission values, as they arrive from a form or JSON body.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::catalog::ItemId;

/// The three optional values a customer can submit for one catalog item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct RawItemInput {
    /// Whole number of pieces. Anything that is not a whole number counts as 0.
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = Option<String>, example = "3")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = Option<String>, example = "starch")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(value_type = Option<String>, example = "iron")]
    pub service: Option<String>,
}

impl RawItemInput {
    pub fn new(
        quantity: Option<&str>,
        comment: Option<&str>,
        service: Option<&str>,
    ) -> Self {
        Self {
            quantity: quantity.map(str::to_string),
            comment: comment.map(str::to_string),
            service: service.map(str::to_string),
        }
    }
}

/// Accept strings, numbers, booleans or null without failing the request.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Submission values keyed by item id. Items without an entry are treated as
/// not ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RawInputs(HashMap<ItemId, RawItemInput>);

impl RawInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ItemId, input: RawItemInput) {
        self.0.insert(id, input);
    }

    pub fn with(mut self, id: impl Into<ItemId>, input: RawItemInput) -> Self {
        self.insert(id.into(), input);
        self
    }

    pub fn get(&self, id: &ItemId) -> Option<&RawItemInput> {
        self.0.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collect `items[<id>][quantity|comment|service]` form fields.
    ///
    /// Fields with any other shape are ignored. When a field repeats, the last
    /// value wins.
    pub fn from_form_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut inputs = Self::new();
        for (name, value) in fields {
            let Some((id, field)) = parse_field_name(name.as_ref()) else {
                continue;
            };

            let entry = inputs.0.entry(ItemId::new(id)).or_default();
            let value = Some(value.into());
            match field {
                ItemField::Quantity => entry.quantity = value,
                ItemField::Comment => entry.comment = value,
                ItemField::Service => entry.service = value,
            }
        }
        inputs
    }
}

impl FromIterator<(ItemId, RawItemInput)> for RawInputs {
    fn from_iter<T: IntoIterator<Item = (ItemId, RawItemInput)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemField {
    Quantity,
    Comment,
    Service,
}

impl ItemField {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ItemField::Quantity => "quantity",
            ItemField::Comment => "comment",
            ItemField::Service => "service",
        }
    }
}

/// Form field name for one value of one item.
pub(crate) fn field_name(id: &ItemId, field: ItemField) -> String {
    format!("items[{}][{}]", id, field.as_str())
}

/// Split `items[<id>][<field>]` into its parts.
pub(crate) fn parse_field_name(name: &str) -> Option<(&str, ItemField)> {
    let rest = name.strip_prefix("items[")?.strip_suffix(']')?;
    let (id, field) = rest.split_once("][")?;
    if id.is_empty() {
        return None;
    }

    let field = match field {
        "quantity" => ItemField::Quantity,
        "comment" => ItemField::Comment,
        "service" => ItemField::Service,
        _ => return None,
    };
    Some((id, field))
}
