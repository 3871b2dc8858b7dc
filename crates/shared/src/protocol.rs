//! Wire types for the commerce API.

use serde::{Deserialize, Serialize};

use crate::domain::{CatalogItem, ItemId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub total: u32,
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub payment: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub total: i64,
    pub items: Vec<ItemId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub total: i64,
}
