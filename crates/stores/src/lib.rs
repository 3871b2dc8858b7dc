//! In-memory data stores for the storefront session.
//!
//! Each store takes an [`event_bus::EventBus`] handle at construction and
//! announces every state change under its topic from `shared::topics`.
//! Stores keep their data behind `RefCell` and expose `&self` methods so
//! a change event is always emitted after the borrow is released; change
//! handlers are free to read the store back synchronously.

mod cart;
mod catalog;
mod order_draft;

pub use cart::CartStore;
pub use catalog::CatalogStore;
pub use order_draft::{DraftFields, OrderDraft};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
