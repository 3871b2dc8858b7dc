use std::cell::RefCell;

use event_bus::EventBus;
use shared::{
    domain::{CatalogItem, ItemId},
    topics,
};

/// The user's in-progress selection, newest addition first.
///
/// The store itself does not deduplicate ids; the presentation layer
/// disables Buy for items already in the cart. Every mutating operation
/// emits `cart:changed`, including removals that matched nothing.
pub struct CartStore {
    bus: EventBus,
    items: RefCell<Vec<CatalogItem>>,
}

impl CartStore {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            items: RefCell::new(Vec::new()),
        }
    }

    /// Prepends `item` and emits `cart:changed`. An item without an id is
    /// dropped without an event; the caller gets no error, only a log
    /// line.
    pub fn add_item(&self, item: CatalogItem) {
        if item.id.as_str().is_empty() {
            tracing::warn!(title = %item.title, "dropping cart add for item without id");
            return;
        }
        self.items.borrow_mut().insert(0, item);
        self.bus.notify(topics::CART_CHANGED);
    }

    /// Removes every entry with `id` and emits `cart:changed` whether or
    /// not anything matched.
    pub fn remove_item(&self, id: &ItemId) {
        self.items.borrow_mut().retain(|item| &item.id != id);
        self.bus.notify(topics::CART_CHANGED);
    }

    /// Empties the cart and emits `cart:changed`.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        self.bus.notify(topics::CART_CHANGED);
    }

    pub fn has_item(&self, id: &ItemId) -> bool {
        self.items.borrow().iter().any(|item| &item.id == id)
    }

    pub fn count(&self) -> usize {
        self.items.borrow().len()
    }

    /// Sum of the priced entries; priceless items contribute zero.
    pub fn total_price(&self) -> i64 {
        self.items
            .borrow()
            .iter()
            .filter_map(|item| item.price)
            .sum()
    }

    /// True iff the total is zero. A cart holding only priceless items
    /// therefore reads as empty; such a cart cannot be ordered anyway.
    pub fn is_empty(&self) -> bool {
        self.total_price() == 0
    }

    pub fn items(&self) -> Vec<CatalogItem> {
        self.items.borrow().clone()
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.borrow().iter().map(|item| item.id.clone()).collect()
    }
}
