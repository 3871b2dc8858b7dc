use std::cell::RefCell;

use event_bus::EventBus;
use shared::{
    domain::{CatalogItem, ItemId},
    topics,
};

/// Owns the full item collection for the session. Items are immutable
/// once loaded; the collection is only ever replaced wholesale.
pub struct CatalogStore {
    bus: EventBus,
    items: RefCell<Vec<CatalogItem>>,
}

impl CatalogStore {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            items: RefCell::new(Vec::new()),
        }
    }

    /// Replaces the catalog and announces `catalog:loaded`.
    pub fn set_catalog(&self, items: Vec<CatalogItem>) {
        *self.items.borrow_mut() = items;
        self.bus.notify(topics::CATALOG_LOADED);
    }

    /// Looks up one item. Absence is a normal outcome (stale id from a
    /// reloaded catalog); callers must handle `None`.
    pub fn get_item(&self, id: &ItemId) -> Option<CatalogItem> {
        self.items
            .borrow()
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    pub fn items(&self) -> Vec<CatalogItem> {
        self.items.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}
