use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A catalog entry. Immutable once loaded from the API.
///
/// `price: None` marks a priceless item: it can sit in the catalog (and
/// even in the cart) for display, but contributes nothing to totals and
/// cannot be bought on its own. On the wire this is a JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub category: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub price: Option<i64>,
}
