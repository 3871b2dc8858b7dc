//! Events reported by the backend worker to the UI thread.

use shared::{domain::CatalogItem, protocol::OrderResponse};

#[derive(Debug)]
pub enum UiEvent {
    /// The worker could not start (runtime build or client construction).
    BackendFailed(String),
    CatalogLoaded(Vec<CatalogItem>),
    CatalogLoadFailed(String),
    OrderPlaced(OrderResponse),
    OrderFailed(String),
}
